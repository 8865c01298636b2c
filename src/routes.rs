use crate::{api::reports, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let reports_limiter = build_limiter(config.rate_reports_per_min);

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/reports")
                .wrap(reports_limiter) // rate limiting
                // /reports
                .service(web::resource("").route(web::post().to(reports::analyze)))
                // /reports/csv
                .service(web::resource("/csv").route(web::post().to(reports::analyze_csv)))
                // /reports/calendar
                .service(web::resource("/calendar").route(web::post().to(reports::calendar)))
                // /reports/summary
                .service(web::resource("/summary").route(web::post().to(reports::summaries)))
                // /reports/ranking
                .service(web::resource("/ranking").route(web::post().to(reports::leaderboard)))
                // /reports/dashboard
                .service(
                    web::resource("/dashboard").route(web::post().to(reports::dashboard_metrics)),
                ),
        ),
    );
}
