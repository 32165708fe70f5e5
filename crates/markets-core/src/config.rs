//! 설정 관리.
//!
//! 기본값, 선택적 설정 파일(`config/default.toml`), 환경 변수
//! (`MARKETS__SECTION__KEY`) 순서로 덮어써서 애플리케이션 설정을 구성합니다.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 데이터 제공자 설정
    #[serde(default)]
    pub provider: ProviderConfig,
    /// 시장 개요/표시 설정
    #[serde(default)]
    pub markets: MarketsConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 출력 여부
    #[serde(default)]
    pub span_events: bool,
    /// 소스 파일명과 줄 번호 출력 여부
    #[serde(default = "default_true")]
    pub with_file: bool,
    /// 대상(모듈 경로) 출력 여부
    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
            with_file: true,
            with_target: true,
        }
    }
}

/// 데이터 제공자(Yahoo 차트 API) 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; ops-markets/0.1)".to_string(),
        }
    }
}

/// 시장 개요 및 표시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketsConfig {
    /// 심볼 미지정 시 조회할 기본 관심 종목
    pub watch_list: Vec<String>,
    /// 개요 모드의 피보나치 계산 기간
    pub overview_range: String,
    /// 개요 모드의 피보나치 계산 간격
    pub overview_interval: String,
    /// 스윙 날짜 표시용 IANA 타임존
    pub display_timezone: String,
}

impl Default for MarketsConfig {
    fn default() -> Self {
        Self {
            watch_list: ["SPY", "QQQ", "DIA", "IWM", "BTC-USD", "GC=F", "CL=F", "^VIX"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            overview_range: "3mo".to_string(),
            overview_interval: "1d".to_string(),
            display_timezone: "UTC".to_string(),
        }
    }
}

impl MarketsConfig {
    /// 표시용 타임존을 파싱합니다. 알 수 없는 이름이면 UTC를 사용합니다.
    pub fn timezone(&self) -> Tz {
        self.display_timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                timezone = %self.display_timezone,
                "Unknown display timezone, falling back to UTC"
            );
            Tz::UTC
        })
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아니며, 기본값과 환경 변수만으로 구성됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let defaults = MarketsConfig::default();

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.request_timeout_secs", default_request_timeout())?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("logging.span_events", false)?
            .set_default("logging.with_file", true)?
            .set_default("logging.with_target", true)?
            .set_default("provider.base_url", ProviderConfig::default().base_url)?
            .set_default("provider.timeout_secs", 10)?
            .set_default("provider.user_agent", ProviderConfig::default().user_agent)?
            .set_default("markets.watch_list", defaults.watch_list)?
            .set_default("markets.overview_range", defaults.overview_range)?
            .set_default("markets.overview_interval", defaults.overview_interval)?
            .set_default("markets.display_timezone", defaults.display_timezone)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("MARKETS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("markets.watch_list")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
