//! Dev.to 公開 - 記事作成 API クライアント

use super::{Confirm, PublishOutcome};
use crate::error::{AppError, Result};
use crate::front_matter;
use serde::{Deserialize, Serialize};

const DEVTO_API_URL: &str = "https://dev.to/api";

/// タイトルが無い場合の既定値
const DEFAULT_TITLE: &str = "No Title";

/// 記事作成リクエストの中身
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticlePayload {
    pub title: String,
    pub body_markdown: String,
    pub published: bool,
}

/// フロントマターからペイロードを構築
///
/// 本文はフロントマターを含む元の内容全体。
pub fn build_payload(content: &str) -> Result<ArticlePayload> {
    let parsed = front_matter::parse(content);
    let front_matter = parsed.front_matter.ok_or(AppError::MissingFrontMatter)?;

    let title = front_matter
        .get("title")
        .unwrap_or(DEFAULT_TITLE)
        .replace('"', "");

    Ok(ArticlePayload {
        title,
        body_markdown: content.to_string(),
        published: front_matter.get("published") == Some("true"),
    })
}

/// Dev.to API クライアント
pub struct DevToClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl Default for DevToClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DevToClient {
    pub fn new() -> Self {
        Self::with_base_url(DEVTO_API_URL)
    }

    /// API のベース URL を差し替える
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 記事を作成し、その URL を返す
    pub async fn create_article(&self, api_key: &str, payload: &ArticlePayload) -> Result<String> {
        let request = ArticleRequest { article: payload };

        let response = self
            .http_client
            .post(format!("{}/articles", self.base_url))
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Dev.to API 応答: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        let article: ArticleResponse =
            serde_json::from_str(&body).map_err(|e| AppError::UnexpectedResponse(e.to_string()))?;

        Ok(article.url)
    }
}

/// Dev.to への公開
pub struct DevToPublisher {
    client: DevToClient,
    api_key: Option<String>,
}

impl DevToPublisher {
    pub fn new(client: DevToClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn publish(&self, content: &str, confirm: &dyn Confirm) -> Result<PublishOutcome> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingCredential)?;
        let payload = build_payload(content)?;

        let message = format!(
            "以下のタイトルで Dev.to に投稿します。\n\n{}\n\n公開: {}\n\nよろしいですか？",
            payload.title,
            if payload.published { "する" } else { "しない (下書き)" }
        );
        if !confirm.confirm("Dev.to へ公開", &message) {
            tracing::info!("Dev.to への公開を中止しました");
            return Ok(PublishOutcome::Cancelled);
        }

        let url = self.client.create_article(api_key, &payload).await?;
        tracing::info!("Dev.to に投稿しました: {}", url);

        Ok(PublishOutcome::DevTo { url })
    }
}

// Dev.to API リクエスト/レスポンス構造体

#[derive(Serialize)]
struct ArticleRequest<'a> {
    article: &'a ArticlePayload,
}

#[derive(Deserialize)]
struct ArticleResponse {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::testing::ScriptedConfirm;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC: &str = "---\ntitle: Hello \"World\"\npublished: true\n---\n本文\n";

    #[test]
    fn payload_strips_quotes_and_keeps_full_content() {
        let payload = build_payload(DOC).unwrap();
        assert_eq!(payload.title, "Hello World");
        assert_eq!(payload.body_markdown, DOC);
        assert!(payload.published);
    }

    #[test]
    fn published_requires_exact_true() {
        for doc in [
            "---\ntitle: a\npublished: True\n---\n",
            "---\ntitle: a\npublished: yes\n---\n",
            "---\ntitle: a\n---\n",
        ] {
            assert!(!build_payload(doc).unwrap().published, "{doc}");
        }
    }

    #[test]
    fn missing_title_uses_default() {
        let payload = build_payload("---\npublished: false\n---\n").unwrap();
        assert_eq!(payload.title, "No Title");
    }

    #[test]
    fn missing_front_matter_is_error() {
        assert!(matches!(build_payload("# 見出しのみ"), Err(AppError::MissingFrontMatter)));
    }

    #[test]
    fn request_json_shape() {
        let payload = build_payload(DOC).unwrap();
        let json = serde_json::to_value(ArticleRequest { article: &payload }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "article": { "title": "Hello World", "body_markdown": DOC, "published": true }
            })
        );
    }

    #[tokio::test]
    async fn posts_article_and_returns_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles"))
            .and(header("api-key", "secret"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "article": { "title": "Hello World", "body_markdown": DOC, "published": true }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({
                    "id": 1,
                    "url": "https://dev.to/me/hello-world-1"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let publisher = DevToPublisher::new(
            DevToClient::with_base_url(server.uri()),
            Some("secret".to_string()),
        );
        let confirm = ScriptedConfirm::yes();

        let outcome = publisher.publish(DOC, &confirm).await.unwrap();
        assert_eq!(
            outcome,
            PublishOutcome::DevTo {
                url: "https://dev.to/me/hello-world-1".to_string()
            }
        );
        assert!(confirm.asked.borrow()[0].contains("Hello World"));
    }

    #[tokio::test]
    async fn missing_api_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let publisher = DevToPublisher::new(DevToClient::with_base_url(server.uri()), None);
        let confirm = ScriptedConfirm::yes();

        let err = publisher.publish(DOC, &confirm).await.unwrap_err();
        assert!(matches!(err, AppError::MissingCredential));
        assert_eq!(confirm.times_asked(), 0);
    }

    #[tokio::test]
    async fn missing_front_matter_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let publisher = DevToPublisher::new(
            DevToClient::with_base_url(server.uri()),
            Some("k".to_string()),
        );

        let err = publisher.publish("本文のみ", &ScriptedConfirm::yes()).await.unwrap_err();
        assert!(matches!(err, AppError::MissingFrontMatter));
    }

    #[tokio::test]
    async fn declining_confirmation_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let publisher = DevToPublisher::new(
            DevToClient::with_base_url(server.uri()),
            Some("k".to_string()),
        );

        let outcome = publisher.publish(DOC, &ScriptedConfirm::no()).await.unwrap();
        assert_eq!(outcome, PublishOutcome::Cancelled);
    }

    #[tokio::test]
    async fn non_success_status_includes_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string("{\"error\":\"Title can't be blank\"}"),
            )
            .mount(&server)
            .await;

        let client = DevToClient::with_base_url(server.uri());
        let err = client
            .create_article("k", &build_payload(DOC).unwrap())
            .await
            .unwrap_err();

        match err {
            AppError::Api { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("Title can't be blank"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_url_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 1 })))
            .mount(&server)
            .await;

        let client = DevToClient::with_base_url(server.uri());
        let err = client
            .create_article("k", &build_payload(DOC).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_network_error() {
        // 接続を受け付けないポート
        let client = DevToClient::with_base_url("http://127.0.0.1:1");
        let err = client
            .create_article("k", &build_payload(DOC).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }
}
