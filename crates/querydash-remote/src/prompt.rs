/// Fixed instruction sent ahead of every user query
pub const INSTRUCTION: &str = r#"You are a business analytics assistant. Analyze the user's query and answer with data suitable for charts, tables and a short written summary.

Reply with JSON only, using exactly one of these shapes:

1. {"type": "combined", "data": {"charts": [CHART, ...], "content": {"metrics": {"name": "value"}, "insights": ["..."], "table": {"headers": ["..."], "rows": [["...", 1]]}}}}
2. {"type": "summary", "data": {"metrics": {"name": "value"}, "insights": ["..."]}}
3. {"type": "table", "data": {"headers": ["..."], "rows": [["...", 1]]}}
4. {"type": "chart", "data": CHART}

where CHART is {"chartType": "bar" | "line" | "pie" | "area", "title": "...", "description": "...", "data": [{"name": "label", "value": 123}]}

Rules:
- Prefer "combined" with at least one bar chart and one line chart.
- Keep numbers as JSON numbers, not strings.
- Give every chart a clear title and description.
- Do not add commentary outside the JSON."#;

/// Request body for a generateContent call
pub fn build_request_body(query: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "parts": [
                { "text": INSTRUCTION },
                { "text": query }
            ]
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_format() {
        let body = build_request_body("Show total sales");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], INSTRUCTION);
        assert_eq!(parts[1]["text"], "Show total sales");
        assert_eq!(parts.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_instruction_names_every_shape() {
        for shape in ["combined", "summary", "table", "chart"] {
            assert!(INSTRUCTION.contains(&format!("\"type\": \"{}\"", shape)));
        }
    }
}
