use serde::{Deserialize, Serialize};

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// The cookbook passages were enough; the primary reply is the answer.
    Direct,
    /// The primary reply carried the sentinel; the answer came from web results.
    WebSearch,
}

impl Route {
    /// Any occurrence of `sentinel` in `reply`, anywhere, sends the query to
    /// the web.
    pub fn decide(reply: &str, sentinel: &str) -> Self {
        if reply.contains(sentinel) {
            Self::WebSearch
        } else {
            Self::Direct
        }
    }
}

/// Final answer of one turn. Web answers always carry `source_links`,
/// even when the search returned no links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub source_links: Option<Vec<String>>,
    pub route: Route,
}

impl Answer {
    pub fn direct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_links: None,
            route: Route::Direct,
        }
    }

    pub fn from_web(text: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            text: text.into(),
            source_links: Some(links),
            route: Route::WebSearch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebDocument {
    pub title: Option<String>,
    pub content: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchResults {
    pub documents: Vec<WebDocument>,
    pub links: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "cevap_yok";

    #[test]
    fn test_exact_sentinel_goes_to_web() {
        assert_eq!(Route::decide("cevap_yok", SENTINEL), Route::WebSearch);
    }

    #[test]
    fn test_embedded_sentinel_goes_to_web() {
        assert_eq!(
            Route::decide("Üzgünüm, cevap_yok.", SENTINEL),
            Route::WebSearch
        );
        assert_eq!(Route::decide("xxcevap_yokxx", SENTINEL), Route::WebSearch);
    }

    #[test]
    fn test_plain_reply_is_direct() {
        assert_eq!(
            Route::decide("Tarif: ekmek yapmak için...", SENTINEL),
            Route::Direct
        );
        assert_eq!(Route::decide("", SENTINEL), Route::Direct);
        // Substring match is case sensitive.
        assert_eq!(Route::decide("CEVAP_YOK", SENTINEL), Route::Direct);
    }

    #[test]
    fn test_web_answer_keeps_empty_links() {
        let answer = Answer::from_web("Web aramasına göre...", vec![]);
        assert_eq!(answer.source_links, Some(vec![]));

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["source_links"], serde_json::json!([]));
        assert_eq!(json["route"], "web_search");
    }

    #[test]
    fn test_direct_answer_has_no_links() {
        let answer = Answer::direct("Mercimek çorbası...");
        assert_eq!(answer.source_links, None);
        assert_eq!(answer.route, Route::Direct);
    }
}
