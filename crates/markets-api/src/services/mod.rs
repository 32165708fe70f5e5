//! API 서비스 계층.
//!
//! 라우트 핸들러가 사용하는 도메인 조합 로직.

pub mod quote_assembler;

pub use quote_assembler::{
    OverviewResponse, QuoteAssembler, SymbolAnalysisResponse, SymbolOverview,
};
