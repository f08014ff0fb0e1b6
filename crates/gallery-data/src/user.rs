use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

/// Number of rows in the virtual user dataset.
pub const TOTAL_USERS: u64 = 1_000_000;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Ethan", "Fiona", "George", "Hannah", "Ivan", "Julia",
    "Kevin", "Laura", "Marco", "Nina", "Oscar", "Paula", "Quentin", "Rita", "Samuel", "Tara",
    "Umar", "Vera", "Walter", "Xenia", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Carter", "Davis", "Evans", "Fischer", "Garcia", "Hughes", "Ivanova",
    "Johnson", "Kim", "Lopez", "Martin", "Nguyen", "Owens", "Patel", "Quinn", "Rossi", "Smith",
    "Turner", "Ueda", "Varga", "Wilson", "Young", "Zimmerman",
];

const ROLES: &[&str] = &["Admin", "Editor", "Viewer", "Developer", "Designer", "Manager"];

/// Synthetic user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Decimal string of the numeric ID
    pub id: String,
    /// Full name, `"{first} {last}"`
    pub name: String,
    /// Email derived from the name and the ID
    pub email: String,
    /// Role label
    pub role: String,
    /// Avatar URL derived from the name and the ID
    pub avatar: String,
}

impl User {
    /// Case-insensitive substring test against name, email and role.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.role.to_lowercase().contains(needle)
    }
}

/// Synthesize the user record for `id`.
///
/// The generator is seeded from the ID, so the same ID always yields the same
/// record. There is no range check: IDs outside the dataset still produce a
/// well-formed record, callers validate the range themselves.
///
/// # Examples
/// ```
/// use gallery_data::generate_user;
///
/// let user = generate_user(42);
/// assert_eq!(user.id, "42");
/// assert_eq!(user, generate_user(42));
/// ```
pub fn generate_user(id: u64) -> User {
    let mut rng = SmallRng::seed_from_u64(seed_for(id));

    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    let role = ROLES[rng.gen_range(0..ROLES.len())];

    let email = format!("{first}.{last}{id}@example.com").to_lowercase();
    let avatar = format!(
        "https://api.dicebear.com/7.x/initials/svg?seed={first}%20{last}%20{id}"
    );

    User {
        id: id.to_string(),
        name: format!("{first} {last}"),
        email,
        role: role.to_string(),
        avatar,
    }
}

/// SplitMix64 finalizer, spreads consecutive IDs over the seed space
const fn seed_for(id: u64) -> u64 {
    let mut z = id.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
