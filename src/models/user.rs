use serde::{Deserialize, Serialize};

use crate::config::AVATAR_URL;

/// The signed-in user as returned by `GET /auth/profile/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn first_upper(s: &str) -> String {
    s.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl UserProfile {
    /// Sidebar name and avatar initials.
    ///
    /// Priority: a username distinct from the email, then first/last name,
    /// then the email prefix split on `.`, `_` and `-`.
    pub fn display_name_and_initials(&self) -> (String, String) {
        let email = non_empty(&self.email);

        if let Some(username) = non_empty(&self.username).filter(|u| Some(*u) != email) {
            let parts: Vec<&str> = username.split_whitespace().collect();
            let initials = match parts.as_slice() {
                [first, .., last] => first_upper(first) + &first_upper(last),
                _ => first_upper(username),
            };
            return (username.to_string(), initials);
        }

        let first = non_empty(&self.first_name).unwrap_or("");
        let last = non_empty(&self.last_name).unwrap_or("");
        if !first.is_empty() || !last.is_empty() {
            let name = format!("{} {}", first, last).trim().to_string();
            let initials = first_upper(first) + &first_upper(last);
            return (name, initials);
        }

        if let Some(email) = email {
            let prefix = email.split('@').next().unwrap_or("");
            let parts: Vec<&str> = prefix.split(['.', '_', '-']).collect();
            let name = parts
                .iter()
                .map(|p| capitalize(p))
                .collect::<Vec<_>>()
                .join(" ");
            let initials = match parts.as_slice() {
                [a, b, ..] => first_upper(a) + &first_upper(b),
                [a] => first_upper(a),
                [] => String::new(),
            };
            let name = if name.trim().is_empty() { "Пользователь".to_string() } else { name };
            let initials = if initials.is_empty() { "У".to_string() } else { initials };
            return (name, initials);
        }

        ("Пользователь".to_string(), "У".to_string())
    }

    pub fn display_name(&self) -> String {
        self.display_name_and_initials().0
    }

    pub fn initials(&self) -> String {
        self.display_name_and_initials().1
    }

    pub fn plan_label(&self) -> &str {
        non_empty(&self.plan).unwrap_or("Базовый план")
    }

    /// Placeholder avatar showing the initials.
    pub fn avatar_url(&self) -> String {
        let initials = self.initials();
        reqwest::Url::parse_with_params(AVATAR_URL, &[("text", initials.as_str())])
            .map(|u| u.to_string())
            .unwrap_or_else(|_| AVATAR_URL.to_string())
    }
}
