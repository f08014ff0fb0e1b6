use std::sync::LazyLock;

use axum::http::{HeaderMap, header};
use regex::Regex;

use super::cache::{BoundedVerdictCache, VerdictCache};
use crate::metrics;

/// Known crawlers: search engines, link-preview bots, SEO tools, archivers
/// and headless prerenderers.
static CRAWLER_USER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"googlebot|google-inspectiontool|adsbot-google|mediapartners-google|storebot-google|",
        r"bingbot|bingpreview|msnbot|slurp|duckduckbot|baiduspider|yandex(bot|images)?|",
        r"sogou|exabot|seznambot|naverbot|yeti|applebot|petalbot|",
        r"facebookexternalhit|facebot|meta-externalagent|twitterbot|linkedinbot|",
        r"pinterest(bot)?|slackbot|slack-imgproxy|discordbot|telegrambot|whatsapp|",
        r"skypeuripreview|vkshare|redditbot|embedly|quora link preview|tumblr|",
        r"semrushbot|ahrefsbot|mj12bot|dotbot|rogerbot|screaming frog|serpstatbot|",
        r"dataforseobot|blexbot|ia_archiver|archive\.org_bot|",
        r"lighthouse|chrome-lighthouse|prerender|headlesschrome|phantomjs|",
        r"w3c_validator|gptbot|ccbot|\bbot\b|crawler|spider",
    ))
    .expect("crawler pattern is valid")
});

/// Headers announcing a speculative fetch, and the value each must contain
const PREFETCH_HEADERS: &[(&str, &str)] = &[
    ("x-moz", "prefetch"),
    ("purpose", "prefetch"),
    ("sec-purpose", "prefetch"),
    ("x-purpose", "preview"),
];

/// Whether the user-agent matches a known crawler signature
pub fn is_crawler_user_agent(user_agent: &str) -> bool {
    CRAWLER_USER_AGENT.is_match(user_agent)
}

fn has_prefetch_intent(headers: &HeaderMap) -> bool {
    PREFETCH_HEADERS.iter().any(|(name, expected)| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.to_ascii_lowercase().contains(expected))
    })
}

/// Decides whether a request comes from an automated client.
///
/// Verdicts are cached per raw user-agent string in an injected
/// [`VerdictCache`].
#[derive(Debug)]
pub struct BotClassifier {
    cache: Box<dyn VerdictCache>,
}

impl BotClassifier {
    pub fn new(cache: impl VerdictCache + 'static) -> Self {
        Self {
            cache: Box::new(cache),
        }
    }

    /// Classifier backed by a [`BoundedVerdictCache`] of `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(BoundedVerdictCache::new(capacity))
    }

    pub fn cache(&self) -> &dyn VerdictCache {
        self.cache.as_ref()
    }

    /// Classify a request from its headers.
    ///
    /// A cached verdict for the user-agent wins. Otherwise the request is a
    /// bot when its user-agent matches a crawler signature or it carries a
    /// prefetch/preview header, and that verdict is cached for the user-agent.
    pub fn is_bot(&self, headers: &HeaderMap) -> bool {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if let Some(verdict) = self.cache.get(user_agent) {
            metrics::record_bot_verdict("cache", verdict);
            return verdict;
        }

        let verdict = is_crawler_user_agent(user_agent) || has_prefetch_intent(headers);
        self.cache.insert(user_agent, verdict);
        metrics::record_bot_verdict("classifier", verdict);

        if verdict {
            tracing::debug!(user_agent, "Classified request as bot");
        }
        verdict
    }
}

impl Default for BotClassifier {
    fn default() -> Self {
        Self::new(BoundedVerdictCache::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    const FIREFOX: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0";
    const SAFARI_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
                              AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 \
                              Mobile/15E148 Safari/604.1";

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.insert(name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_known_crawlers() {
        for ua in [
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
            "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
            "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)",
            "Twitterbot/1.0",
            "LinkedInBot/1.0 (compatible; Mozilla/5.0; Apache-HttpClient +http://www.linkedin.com)",
            "Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)",
            "Mozilla/5.0 (compatible; AhrefsBot/7.0; +http://ahrefs.com/robot/)",
            "Mozilla/5.0 (compatible; SemrushBot/7~bl; +http://www.semrush.com/bot.html)",
            "WhatsApp/2.23.20.0",
            "Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)",
        ] {
            assert!(is_crawler_user_agent(ua), "{ua}");
        }
    }

    #[test]
    fn test_browsers_are_not_crawlers() {
        for ua in [CHROME, FIREFOX, SAFARI_IOS, ""] {
            assert!(!is_crawler_user_agent(ua), "{ua}");
        }
    }

    #[test]
    fn test_is_bot_by_user_agent() {
        let classifier = BotClassifier::default();

        assert!(classifier.is_bot(&headers(&[("user-agent", "Googlebot/2.1")])));
        assert!(!classifier.is_bot(&headers(&[("user-agent", CHROME)])));
        assert!(!classifier.is_bot(&HeaderMap::new()));
    }

    #[test]
    fn test_prefetch_headers() {
        for (name, value) in [
            ("x-moz", "prefetch"),
            ("purpose", "prefetch"),
            ("sec-purpose", "prefetch;prerender"),
            ("x-purpose", "preview"),
        ] {
            let classifier = BotClassifier::default();
            assert!(
                classifier.is_bot(&headers(&[("user-agent", FIREFOX), (name, value)])),
                "{name}: {value}"
            );
        }

        let classifier = BotClassifier::default();
        assert!(!classifier.is_bot(&headers(&[("user-agent", FIREFOX), ("purpose", "navigate")])));
    }

    #[test]
    fn test_verdict_is_cached_by_user_agent() {
        let classifier = BotClassifier::default();

        assert!(classifier.is_bot(&headers(&[("user-agent", SAFARI_IOS), ("x-purpose", "preview")])));
        assert_eq!(classifier.cache().get(SAFARI_IOS), Some(true));

        // The cached verdict sticks to the user-agent
        assert!(classifier.is_bot(&headers(&[("user-agent", SAFARI_IOS)])));
        assert_eq!(classifier.cache().len(), 1);
    }

    #[test]
    fn test_cache_is_bounded() {
        let classifier = BotClassifier::with_capacity(2);

        for ua in ["agent-a", "agent-b", "agent-c"] {
            let mut map = HeaderMap::new();
            map.insert(header::USER_AGENT, HeaderValue::from_static(ua));
            classifier.is_bot(&map);
        }

        assert_eq!(classifier.cache().len(), 2);
        assert_eq!(classifier.cache().get("agent-a"), None);
    }
}
