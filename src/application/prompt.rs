use crate::domain::DomainError;

const DOCUMENTS: &str = "{{documents}}";
const QUERY: &str = "{{query}}";
const SENTINEL: &str = "{{sentinel}}";

pub const DEFAULT_RAG_TEMPLATE: &str = "
Answer the following query given the documents.
If the answer is not contained within the documents reply with '{{sentinel}}'
Answer all questions in Turkish.

Documents:
{{documents}}
Query: {{query}}
";

pub const DEFAULT_WEB_SEARCH_TEMPLATE: &str = "
Answer the following query given the documents retrieved from the web.
Your answer should indicate that your answer was generated from websearch.
Answer all questions in Turkish.

Documents:
{{documents}}

Query: {{query}}
";

/// A prompt with `{{documents}}` and `{{query}}` slots. Both are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, DomainError> {
        let template = template.into();
        for slot in [DOCUMENTS, QUERY] {
            if !template.contains(slot) {
                return Err(DomainError::validation(format!(
                    "prompt template is missing {slot}"
                )));
            }
        }
        Ok(Self { template })
    }

    /// Like [`PromptTemplate::new`], with every `{{sentinel}}` replaced first.
    pub fn with_sentinel(template: &str, sentinel: &str) -> Result<Self, DomainError> {
        Self::new(template.replace(SENTINEL, sentinel))
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn render<S: AsRef<str>>(&self, documents: &[S], query: &str) -> String {
        let documents = documents
            .iter()
            .map(|d| format!("  {}", d.as_ref()))
            .collect::<Vec<_>>()
            .join("\n");

        // Query goes in last so text inside it is never treated as a slot.
        self.template
            .replace(DOCUMENTS, &documents)
            .replace(QUERY, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slot_is_rejected() {
        assert!(PromptTemplate::new("Query: {{query}}").is_err());
        assert!(PromptTemplate::new("Docs: {{documents}}").is_err());
        assert!(PromptTemplate::new("{{documents}} {{query}}").is_ok());
    }

    #[test]
    fn test_render_lists_documents_and_query() {
        let template = PromptTemplate::new("Docs:\n{{documents}}\nQ: {{query}}").unwrap();
        let prompt = template.render(&["bir", "iki"], "üç?");
        assert_eq!(prompt, "Docs:\n  bir\n  iki\nQ: üç?");
    }

    #[test]
    fn test_render_with_no_documents() {
        let template = PromptTemplate::new("[{{documents}}] {{query}}").unwrap();
        assert_eq!(template.render::<&str>(&[], "q"), "[] q");
    }

    #[test]
    fn test_default_rag_template_carries_sentinel() {
        let template = PromptTemplate::with_sentinel(DEFAULT_RAG_TEMPLATE, "cevap_yok").unwrap();
        assert!(template.as_str().contains("reply with 'cevap_yok'"));
        assert!(!template.as_str().contains("{{sentinel}}"));
        assert!(template.as_str().contains("Answer all questions in Turkish."));
    }

    #[test]
    fn test_default_web_template_mentions_websearch() {
        let template = PromptTemplate::new(DEFAULT_WEB_SEARCH_TEMPLATE).unwrap();
        let prompt = template.render(&["Serper snippet"], "Bugün hava nasıl?");
        assert!(prompt.contains("generated from websearch"));
        assert!(prompt.contains("  Serper snippet"));
        assert!(prompt.ends_with("Query: Bugün hava nasıl?\n"));
    }
}
