pub mod briefing;
pub mod kbo;
pub mod news;
pub mod quote;
mod registry;
pub mod schedule;
pub mod weather;
pub mod web;

pub use briefing::BriefTodayTool;
pub use kbo::KboRankTool;
pub use news::NewsHeadlinesTool;
pub use quote::DailyQuoteTool;
pub use registry::{
    json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry,
};
pub use schedule::TodayScheduleTool;
pub use weather::WeatherTool;
pub use web::ScrapePageTool;

use daybrief_core::config::AppConfig;
use daybrief_core::llm::ChatClient;
use std::sync::Arc;

/// Build the full daybrief tool set from configuration.
pub fn build_registry(config: &AppConfig) -> ToolRegistry {
    let llm = Arc::new(ChatClient::new(config.llm.clone()));

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ScrapePageTool::new(
        config.http.clone(),
        config.scrape.clone(),
    )));
    registry.register(Arc::new(WeatherTool::new(
        config.http.clone(),
        config.weather.clone(),
    )));
    registry.register(Arc::new(NewsHeadlinesTool::new(
        config.http.clone(),
        config.news.clone(),
    )));
    registry.register(Arc::new(KboRankTool::new(
        config.http.clone(),
        config.kbo.clone(),
    )));
    registry.register(Arc::new(TodayScheduleTool::new()));
    registry.register(Arc::new(DailyQuoteTool::new(llm)));
    registry.register(Arc::new(BriefTodayTool::new()));
    registry
}
