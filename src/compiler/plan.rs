//! Query plans

use serde::Deserialize;

use crate::filters::FilterValue;

/// A compiled query pair, immutable once received
///
/// Both statements accept the identical positional parameter list in
/// `values`; the compiler guarantees this by construction and the
/// orchestrator trusts it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryPlan {
    /// The sample (data) statement
    pub statement: String,

    /// The exact-count statement
    pub count_statement: String,

    /// Positional parameters shared by both statements
    pub values: Vec<FilterValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_deserialization() {
        let body = r#"{
            "statement": "SELECT * FROM orders WHERE true AND status = $1 LIMIT 10000 OFFSET 0",
            "count_statement": "SELECT COUNT(*) FROM orders WHERE true AND status = $1 LIMIT 1",
            "values": ["open"]
        }"#;
        let plan: QueryPlan = serde_json::from_str(body).unwrap();
        assert!(plan.statement.starts_with("SELECT * FROM orders"));
        assert!(plan.count_statement.contains("COUNT(*)"));
        assert_eq!(plan.values, vec![FilterValue::Text("open".to_string())]);
    }

    #[test]
    fn test_missing_count_statement_rejected() {
        let body = r#"{"statement": "SELECT 1", "values": []}"#;
        assert!(serde_json::from_str::<QueryPlan>(body).is_err());
    }
}
