use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub type_: String,
    pub properties: Value,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    pub fn new(type_: &str, properties: Value, required: Vec<String>) -> Self {
        Self { type_: type_.to_string(), properties, required }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMeta {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

impl ToolMeta {
    pub fn new(name: &str, title: &str, description: &str, input_schema: ToolInputSchema) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ToolsMeta(pub Vec<ToolMeta>);
