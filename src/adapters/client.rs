use crate::adapters::http::{
    CreateCubbyRequest, CubbyRef, ErrorBody, LoadItemsRequest, MoveItemRequest,
    SelectItemResponse,
};
use crate::core::{Item, Snapshot, SortingRobot};
use crate::utils::error::{ErrorCode, Result, SortingError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// `SortingRobot` backed by a remote server. Rejections come back as the
/// same `SortingError` kinds the in-process service returns.
#[derive(Debug, Clone)]
pub struct RemoteRobot {
    base_url: String,
    client: Client,
}

impl RemoteRobot {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("server", base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        if response.status().is_success() {
            return Ok(response.json::<T>().await?);
        }

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("Server answered {}: {}", status, text);
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => Err(error_from_body(body)),
            Err(_) => Err(SortingError::Remote {
                code: format!("http_{}", status.as_u16()),
                message: text,
            }),
        }
    }
}

/// Rebuilds the typed error from its wire form.
pub fn error_from_body(body: ErrorBody) -> SortingError {
    match body.code {
        ErrorCode::InvalidArgument => SortingError::InvalidArgument {
            field: body.field.unwrap_or_else(|| "request".to_string()),
            reason: body.reason.unwrap_or(body.message),
        },
        ErrorCode::AlreadySelected => SortingError::AlreadySelected,
        ErrorCode::EmptyCargo => SortingError::EmptyCargo,
        ErrorCode::NothingSelected => SortingError::NothingSelected,
        ErrorCode::CubbyFull => SortingError::CubbyFull {
            id: body.id.unwrap_or_default(),
            capacity: body.capacity.unwrap_or(0),
        },
        ErrorCode::CubbyExists => SortingError::CubbyExists {
            id: body.id.unwrap_or_default(),
        },
        ErrorCode::Internal => SortingError::Remote {
            code: body.code.to_string(),
            message: body.message,
        },
    }
}

#[async_trait]
impl SortingRobot for RemoteRobot {
    async fn load_items(&self, items: Vec<Item>) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/load"))
            .json(&LoadItemsRequest { items })
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn select_item(&self) -> Result<Item> {
        let response = self.client.post(self.endpoint("/select")).send().await?;
        let body = Self::decode::<SelectItemResponse>(response).await?;
        Ok(body.item)
    }

    async fn move_item(&self, cubby_id: &str) -> Result<()> {
        let request = MoveItemRequest {
            cubby: CubbyRef {
                id: cubby_id.to_string(),
            },
        };
        let response = self
            .client
            .post(self.endpoint("/move"))
            .json(&request)
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn create_cubby(&self, cubby_id: &str, capacity: usize) -> Result<()> {
        let request = CreateCubbyRequest {
            id: cubby_id.to_string(),
            capacity,
        };
        let response = self
            .client
            .post(self.endpoint("/cubbies"))
            .json(&request)
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let response = self.client.get(self.endpoint("/state")).send().await?;
        Self::decode::<Snapshot>(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(RemoteRobot::new("127.0.0.1:50051").is_err());
        let robot = RemoteRobot::new("http://127.0.0.1:50051/").unwrap();
        assert_eq!(robot.endpoint("/load"), "http://127.0.0.1:50051/load");
    }

    #[test]
    fn test_error_from_body_uses_structured_fields() {
        let err = error_from_body(ErrorBody::from_error(&SortingError::CubbyFull {
            id: "Bob's (2)".to_string(),
            capacity: 12,
        }));
        match err {
            SortingError::CubbyFull { id, capacity } => {
                assert_eq!(id, "Bob's (2)");
                assert_eq!(capacity, 12);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = error_from_body(ErrorBody::from_error(&SortingError::invalid_argument(
            "cubby.id",
            "value cannot be empty or whitespace-only",
        )));
        match err {
            SortingError::InvalidArgument { field, reason } => {
                assert_eq!(field, "cubby.id");
                assert_eq!(reason, "value cannot be empty or whitespace-only");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = error_from_body(ErrorBody::from_error(&SortingError::EmptyCargo));
        assert!(matches!(err, SortingError::EmptyCargo));
    }
}
