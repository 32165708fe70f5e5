//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 제공자 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 알 수 없는 심볼
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// 전송 계층 오류 (연결 실패, 타임아웃 등)
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx 이외의 HTTP 응답
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 응답 본문 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 필수 값이 빠진 응답
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DataError {
    /// 메트릭 라벨용 오류 종류.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SymbolNotFound(_) => "not_found",
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Parse(_) => "parse",
            Self::InvalidData(_) => "invalid_data",
            Self::ConfigError(_) => "config",
        }
    }

    /// 알 수 없는 심볼 오류인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            DataError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(DataError::SymbolNotFound("X".into()).kind(), "not_found");
        assert_eq!(
            DataError::Http {
                status: 502,
                message: "Bad Gateway".into()
            }
            .kind(),
            "http"
        );
        assert!(DataError::SymbolNotFound("X".into()).is_not_found());
        assert!(!DataError::Network("reset".into()).is_not_found());
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(DataError::from(err), DataError::Parse(_)));
    }
}
