use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub emp_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let name = format!("{} {}", first, last);
        let name = name.trim();
        if name.is_empty() {
            "Unnamed".to_string()
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub role_id: i64,
    pub role_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub company_id: i64,
    pub company_name: String,
}
