//! 路径参数与请求头提取器

use actix_web::HttpRequest;

/// 定义从路径参数中安全提取正整数 ID 的提取器
///
/// 生成的类型既可以直接作为处理函数参数（按参数名读取 match_info），
/// 也可以放进 `web::Path<(A, B)>` 元组中反序列化。
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl $name {
            fn parse(raw: &str) -> Result<Self, String> {
                match raw.parse::<i64>() {
                    Ok(id) if id > 0 => Ok(Self(id)),
                    _ => Err(format!("Invalid {}: {}", $param, raw)),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                std::future::ready(Self::parse(raw).map_err(|msg| {
                    let body = $crate::models::ApiResponse::error_empty(
                        $crate::models::ErrorCode::BadRequest,
                        msg.clone(),
                    );
                    actix_web::error::InternalError::from_response(
                        msg,
                        actix_web::HttpResponse::BadRequest().json(body),
                    )
                    .into()
                }))
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");

/// 上游会话层写入的操作者标识
pub const ACTOR_HEADER: &str = "X-Actor";

/// 读取操作者标识，缺失或为空时返回 None
pub fn extract_actor(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|actor| !actor.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::FromRequest;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_course_id_from_path() {
        let req = TestRequest::default()
            .param("course_id", "42")
            .to_http_request();
        let id = SafeCourseIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_course_id_rejects_non_positive() {
        for raw in ["0", "-3", "abc"] {
            let req = TestRequest::default()
                .param("course_id", raw)
                .to_http_request();
            assert!(SafeCourseIdI64::extract(&req).await.is_err());
        }
    }

    #[test]
    fn test_extract_actor() {
        let req = TestRequest::default()
            .insert_header((ACTOR_HEADER, "  registrar "))
            .to_http_request();
        assert_eq!(extract_actor(&req).as_deref(), Some("registrar"));

        let req = TestRequest::default()
            .insert_header((ACTOR_HEADER, " "))
            .to_http_request();
        assert_eq!(extract_actor(&req), None);
        assert_eq!(extract_actor(&TestRequest::default().to_http_request()), None);
    }
}
