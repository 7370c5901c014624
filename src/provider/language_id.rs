crate::define_id_enum! {
    /// Provider identity: the language key a provider answers to
    LanguageId {
        Java => "java" : "Java",
        NodeJs => "nodejs" : "Node.js",
        Python => "python" : "Python",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_serialization() {
        assert_eq!(
            serde_json::to_string(&LanguageId::NodeJs).unwrap(),
            "\"nodejs\""
        );
        assert_eq!(
            serde_json::to_string(&LanguageId::Custom("go".to_string())).unwrap(),
            "\"go\""
        );
    }

    #[test]
    fn test_language_id_deserialization() {
        assert_eq!(
            serde_json::from_str::<LanguageId>("\"python\"").unwrap(),
            LanguageId::Python
        );
        assert_eq!(
            serde_json::from_str::<LanguageId>("\"rust\"").unwrap(),
            LanguageId::Custom("rust".to_string())
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_eq!(LanguageId::parse("java"), LanguageId::Java);
        assert_eq!(
            LanguageId::parse("Java"),
            LanguageId::Custom("Java".to_string())
        );
    }

    #[test]
    fn test_display_uses_key() {
        assert_eq!(LanguageId::NodeJs.to_string(), "nodejs");
        assert_eq!(LanguageId::NodeJs.display_name(), "Node.js");
        assert_eq!("python".parse::<LanguageId>().unwrap(), LanguageId::Python);
    }

    #[test]
    fn test_all_variants_order() {
        let keys: Vec<&str> = LanguageId::all_variants().iter().map(|l| l.key()).collect();
        assert_eq!(keys, vec!["java", "nodejs", "python"]);
    }
}
