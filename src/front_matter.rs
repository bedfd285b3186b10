//! フロントマター解析 - 先頭の `---` ブロックと本文を分離

use regex::Regex;
use std::sync::LazyLock;

/// 先頭の `---` から最初の単独 `---` 行までにマッチ
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)").expect("valid regex")
});

/// フロントマター (出現順を保持するキー/値の組)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, String)>,
}

impl FrontMatter {
    /// 値を設定。既存のキーは位置を保ったまま上書き
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `key: value` 行の並びを解析。`:` を含まない行は読み飛ばす
    fn from_block(block: &str) -> Self {
        let mut front_matter = Self::default();
        for line in block.lines() {
            if let Some((key, value)) = line.split_once(':') {
                front_matter.insert(key.trim(), value.trim());
            }
        }
        front_matter
    }
}

/// 解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument<'a> {
    pub front_matter: Option<FrontMatter>,
    pub body: &'a str,
}

/// ドキュメントをフロントマターと本文に分離
///
/// 先頭がフェンスで始まらない場合はフロントマターなし、本文は入力そのまま。
pub fn parse(document: &str) -> ParsedDocument<'_> {
    let Some(caps) = FENCE_RE.captures(document) else {
        return ParsedDocument {
            front_matter: None,
            body: document,
        };
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let end = caps.get(0).map_or(0, |m| m.end());

    ParsedDocument {
        front_matter: Some(FrontMatter::from_block(block)),
        body: &document[end..],
    }
}
