//! HTTP клиент обобщённого CRUD API
//!
//! Каждый запрос ограничен таймаутом `REQUEST_TIMEOUT_MS`: по его истечении
//! запрос прерывается через `AbortController`. Ответ с ошибкой (HTTP 400)
//! разбирается в `OperationResult`.

use std::fmt;

use contracts::shared::operation_result::OperationResult;
use contracts::shared::paging::{FilterRequest, PagingResult};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use web_sys::AbortController;

use super::api_utils::api_url;

pub const REQUEST_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Сервер не ответил за `REQUEST_TIMEOUT_MS`
    Timeout,
    /// Запрос не дошёл до сервера
    Network(String),
    /// Сервер вернул конверт ошибки
    Operation(OperationResult),
    /// Ошибка без конверта (прокси, 5xx и т.п.)
    Http { status: u16, body: String },
    /// Ответ не удалось разобрать
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Operation(result) if result.is_not_found())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Timeout => write!(f, "Request timed out after {} ms", REQUEST_TIMEOUT_MS),
            ApiError::Network(e) => write!(f, "Request failed: {}", e),
            ApiError::Operation(result) => {
                write!(f, "{}", result)?;
                if let Some(errors) = &result.errors {
                    write!(f, ": {}", errors.join("; "))?;
                }
                Ok(())
            }
            ApiError::Http { status, .. } => write!(f, "HTTP error: {}", status),
            ApiError::Decode(e) => write!(f, "Failed to parse response: {}", e),
        }
    }
}

/// Разбор тела неуспешного ответа
fn failure_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<OperationResult>(body) {
        Ok(result) => ApiError::Operation(result),
        Err(_) => ApiError::Http {
            status,
            body: body.to_string(),
        },
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Отправка запроса с таймаутом. `finish` дописывает тело, если оно есть.
async fn send_with_timeout<F>(builder: RequestBuilder, finish: F) -> Result<String, ApiError>
where
    F: FnOnce(RequestBuilder) -> Result<Request, ApiError>,
{
    let controller = AbortController::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let signal = controller.signal();
    let request = finish(builder.abort_signal(Some(&signal)))?;

    let timer = Timeout::new(REQUEST_TIMEOUT_MS, move || controller.abort());
    let result = request.send().await;
    // Drop отменяет таймер
    drop(timer);

    let response: Response = match result {
        Ok(response) => response,
        Err(_) if signal.aborted() => return Err(ApiError::Timeout),
        Err(e) => return Err(ApiError::Network(e.to_string())),
    };

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        if signal.aborted() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.to_string())
        }
    })?;

    if response.ok() {
        Ok(body)
    } else {
        log::warn!("{} {} -> {}", response.url(), status, body);
        Err(failure_from_body(status, &body))
    }
}

async fn send(builder: RequestBuilder) -> Result<String, ApiError> {
    send_with_timeout(builder, |b| {
        b.build().map_err(|e| ApiError::Network(e.to_string()))
    })
    .await
}

async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<String, ApiError> {
    send_with_timeout(builder, |b| {
        b.json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))
    })
    .await
}

/// Клиент набора CRUD маршрутов одной сущности (`/api/v1/{route}`)
#[derive(Debug, Clone, Copy)]
pub struct CrudApi {
    route: &'static str,
}

/// Код записи как один сегмент пути
fn code_segment(code: &str) -> String {
    urlencoding::encode(code).into_owned()
}

impl CrudApi {
    pub const fn new(route: &'static str) -> Self {
        Self { route }
    }

    fn url(&self, tail: &str) -> String {
        if tail.is_empty() {
            api_url(self.route)
        } else {
            api_url(&format!("{}/{}", self.route, tail))
        }
    }

    /// GET /GetNewCode (ответ текстом)
    pub async fn get_new_code(&self) -> Result<String, ApiError> {
        send(Request::get(&self.url("GetNewCode"))).await
    }

    /// GET /{code}
    pub async fn get<M: DeserializeOwned>(&self, code: &str) -> Result<M, ApiError> {
        let body = send(Request::get(&self.url(&code_segment(code)))).await?;
        decode(&body)
    }

    /// POST /ListByIds
    pub async fn list_by_ids<E: DeserializeOwned>(&self, ids: &[Uuid]) -> Result<Vec<E>, ApiError> {
        let body = send_json(Request::post(&self.url("ListByIds")), &ids).await?;
        decode(&body)
    }

    /// GET /Filter
    pub async fn filter<M: DeserializeOwned>(
        &self,
        request: &FilterRequest,
    ) -> Result<PagingResult<M>, ApiError> {
        let query = serde_qs::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = format!("{}?{}", self.url("Filter"), query);
        let body = send(Request::get(&url)).await?;
        decode(&body)
    }

    /// POST / (возвращает ID новой записи)
    pub async fn insert<D: Serialize>(&self, dto: &D) -> Result<Uuid, ApiError> {
        let body = send_json(Request::post(&self.url("")), dto).await?;
        decode(&body)
    }

    /// PUT /{id}
    pub async fn update<D: Serialize>(&self, id: Uuid, dto: &D) -> Result<(), ApiError> {
        send_json(Request::put(&self.url(&id.to_string())), dto).await?;
        Ok(())
    }

    /// DELETE /{id}
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        send(Request::delete(&self.url(&id.to_string()))).await?;
        Ok(())
    }

    /// DELETE / с массивом ID: удаляются все или ни одной
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<(), ApiError> {
        send_json(Request::delete(&self.url("")), &ids).await?;
        Ok(())
    }

    /// GET /Count
    pub async fn count(&self) -> Result<i64, ApiError> {
        let body = send(Request::get(&self.url("Count"))).await?;
        decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::operation_result::ErrorCode;

    #[test]
    fn test_code_is_encoded_as_one_segment() {
        assert_eq!(code_segment("A/B C?#"), "A%2FB%20C%3F%23");
        assert_eq!(code_segment("D01"), "D01");
    }

    #[test]
    fn test_envelope_body_is_decoded() {
        let body = r#"{"ErrorCode":10000,"UserMessage":"Not found","TraceId":"abc"}"#;
        let err = failure_from_body(400, body);
        assert!(err.is_not_found());
        match err {
            ApiError::Operation(result) => {
                assert_eq!(result.code(), Some(ErrorCode::NotFound));
                assert_eq!(result.trace_id.as_deref(), Some("abc"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_non_envelope_body_keeps_status() {
        let err = failure_from_body(502, "Bad Gateway");
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                body: "Bad Gateway".into()
            }
        );
        assert_eq!(err.to_string(), "HTTP error: 502");
    }

    #[test]
    fn test_validation_errors_are_shown() {
        let body = r#"{"ErrorCode":10001,"UserMessage":"Invalid data","Errors":["DepartmentCode is required"]}"#;
        let err = failure_from_body(400, body);
        assert_eq!(
            err.to_string(),
            "[10001] Invalid data: DepartmentCode is required"
        );
    }

    #[test]
    fn test_filter_query_string() {
        let request = FilterRequest {
            page_size: 50,
            page_number: 2,
            search: Some("sales".into()),
        };
        let query = serde_qs::to_string(&request).unwrap();
        assert_eq!(query, "pageSize=50&pageNumber=2&search=sales");
    }
}
