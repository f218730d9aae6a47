use crate::{
    api::{balance, leave, leave_type},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

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

    let read_limiter = Arc::new(build_limiter(config.rate_read_per_min));
    let write_limiter = Arc::new(build_limiter(config.rate_write_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(read_limiter)
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .wrap(write_limiter.clone())
                            .route(web::get().to(leave::list_leaves))
                            .route(web::post().to(leave::apply_leave)),
                    )
                    // literal paths before /{id}
                    .service(web::resource("/mine").route(web::get().to(leave::my_leaves)))
                    .service(
                        web::resource("/queue/manager").route(web::get().to(leave::manager_queue)),
                    )
                    .service(web::resource("/queue/hr").route(web::get().to(leave::hr_queue)))
                    // /leave/{id}
                    .service(
                        web::resource("/{id}")
                            .wrap(write_limiter.clone())
                            .route(web::get().to(leave::get_leave))
                            .route(web::put().to(leave::update_leave))
                            .route(web::delete().to(leave::delete_leave)),
                    )
                    .service(
                        web::resource("/{id}/manager/approve")
                            .wrap(write_limiter.clone())
                            .route(web::put().to(leave::manager_approve)),
                    )
                    .service(
                        web::resource("/{id}/manager/reject")
                            .wrap(write_limiter.clone())
                            .route(web::put().to(leave::manager_reject)),
                    )
                    .service(
                        web::resource("/{id}/hr/approve")
                            .wrap(write_limiter.clone())
                            .route(web::put().to(leave::hr_approve)),
                    )
                    .service(
                        web::resource("/{id}/hr/reject")
                            .wrap(write_limiter.clone())
                            .route(web::put().to(leave::hr_reject)),
                    ),
            )
            .service(
                web::scope("/balances")
                    .service(web::resource("").route(web::get().to(balance::all_balances)))
                    .service(web::resource("/mine").route(web::get().to(balance::my_balances)))
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(balance::employee_balances)),
                    ),
            )
            .service(
                web::scope("/leave-types").service(
                    web::resource("")
                        .wrap(write_limiter.clone())
                        .route(web::get().to(leave_type::list_leave_types))
                        .route(web::post().to(leave_type::create_leave_type)),
                ),
            ),
    );
}
