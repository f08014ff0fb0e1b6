/// Path prefixes that are never routed to snapshots
const BYPASS_PREFIXES: &[&str] = &[
    "/api/", "/assets/", "/static/", "/dist/", "/build/", "/snapshot/",
];

/// Exact paths that are never routed to snapshots
const BYPASS_PATHS: &[&str] = &[
    "/api",
    "/snapshot",
    "/health",
    "/healthz",
    "/metrics",
    "/robots.txt",
    "/sitemap.xml",
    "/manifest.json",
    "/site.webmanifest",
    "/favicon.ico",
];

/// Static file extensions, served as-is to every client
const BYPASS_EXTENSIONS: &[&str] = &[
    "js", "mjs", "css", "map", "json", "webmanifest", "png", "jpg", "jpeg", "gif", "svg", "ico",
    "webp", "avif", "woff", "woff2", "ttf", "otf", "eot",
];

/// Whether bot detection is skipped for `path`.
///
/// API calls, health checks, asset directories, static files and crawler
/// metadata files are always served normally.
pub fn should_bypass_bot_detection(path: &str) -> bool {
    if BYPASS_PATHS.contains(&path) || BYPASS_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return true;
    }

    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            BYPASS_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
