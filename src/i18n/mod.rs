//! Internationalization (i18n) support
//!
//! Content is bilingual (Romanian and English). Every translatable field is an
//! [`I18nString`]; user-facing messages produced by the backend itself come
//! from a [`Catalog`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported site languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ro,
    En,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Ro => "ro",
            Lang::En => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ro" => Ok(Lang::Ro),
            "en" => Ok(Lang::En),
            other => anyhow::bail!("Unknown language: {}. Available: ro, en", other),
        }
    }
}

/// Parallel Romanian/English text for one logical string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nString {
    #[serde(default)]
    pub ro: String,
    #[serde(default)]
    pub en: String,
}

impl I18nString {
    pub fn new(ro: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ro: ro.into(),
            en: en.into(),
        }
    }

    /// Text for `lang`, falling back to Romanian when that value is empty
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En if !self.en.trim().is_empty() => &self.en,
            _ => &self.ro,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.ro.trim().is_empty() && self.en.trim().is_empty()
    }
}

/// Built-in messages: (key, ro, en)
const BUILTIN_MESSAGES: &[(&str, &str, &str)] = &[
    (
        "lead.sent",
        "Mulțumim! Vă contactăm în cel mai scurt timp.",
        "Thank you! We will get back to you shortly.",
    ),
    (
        "lead.timeout",
        "Serverul nu a răspuns la timp. Mesajul a fost salvat, vă rugăm încercați din nou.",
        "The server did not respond in time. Your message was saved, please try again.",
    ),
    (
        "lead.network",
        "Nu am putut trimite mesajul. Mesajul a fost salvat, vă rugăm încercați din nou.",
        "We could not send your message. It was saved, please try again.",
    ),
    (
        "lead.invalid",
        "Completați numele, mesajul și un email sau telefon.",
        "Please fill in your name, a message and an email or phone number.",
    ),
    ("page.not_found", "Pagina nu a fost găsită.", "Page not found."),
];

/// Localized message catalog: lang -> key -> message
#[derive(Debug, Clone)]
pub struct Catalog {
    messages: HashMap<Lang, HashMap<String, String>>,
}

impl Catalog {
    /// Create a catalog holding the built-in messages
    pub fn new() -> Self {
        let mut messages: HashMap<Lang, HashMap<String, String>> = HashMap::new();
        for (key, ro, en) in BUILTIN_MESSAGES {
            messages
                .entry(Lang::Ro)
                .or_default()
                .insert(key.to_string(), ro.to_string());
            messages
                .entry(Lang::En)
                .or_default()
                .insert(key.to_string(), en.to_string());
        }
        Self { messages }
    }

    /// Load `ro.yml`/`en.yml` (or `.json`) overrides from a directory
    ///
    /// Files are flat maps of key to message; nested maps are joined with dots.
    pub fn load_overrides<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yml") | Some("yaml") | Some("json")) {
                continue;
            }

            let lang = match path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(Lang::from_str)
            {
                Some(Ok(lang)) => lang,
                _ => {
                    tracing::debug!("Skipping language file {:?}", path);
                    continue;
                }
            };

            let content = fs::read_to_string(&path)?;
            // serde_yaml also accepts JSON documents
            let data: serde_yaml::Value = match serde_yaml::from_str(&content) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                    continue;
                }
            };

            let table = self.messages.entry(lang).or_default();
            flatten_messages(&data, "", table);
            tracing::debug!("Loaded language file: {:?}", path);
        }

        Ok(())
    }

    /// Look up a message, falling back to Romanian and then to the key itself
    pub fn t(&self, lang: Lang, key: &str) -> String {
        self.messages
            .get(&lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(&Lang::Ro).and_then(|t| t.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_messages(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    let serde_yaml::Value::Mapping(map) = value else {
        return;
    };

    for (k, v) in map {
        let serde_yaml::Value::String(key) = k else {
            continue;
        };
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match v {
            serde_yaml::Value::String(s) => {
                out.insert(full_key, s.clone());
            }
            serde_yaml::Value::Number(n) => {
                out.insert(full_key, n.to_string());
            }
            serde_yaml::Value::Mapping(_) => flatten_messages(v, &full_key, out),
            _ => {}
        }
    }
}
