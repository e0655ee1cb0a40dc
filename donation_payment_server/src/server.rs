use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use donation_payment_engine::{
    events::{EventHandlers, EventProducers},
    sqlite,
    DonationFlowApi,
    SqliteDatabase,
    VolunteerApi,
};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::razorpay::RazorpayVerifier,
    notify::notification_hooks,
    routes::{create_order, health, verify_payment, DonationsRoute, ProcessPaymentRoute, SavePaymentRoute},
};

/// How many post-commit events may queue up per hook before publishers start awaiting. Donor
/// notifications are slow (two REST calls); a modest buffer absorbs bursts.
const EVENT_BUFFER_SIZE: usize = 50;
const MAX_DB_CONNECTIONS: u32 = 25;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, MAX_DB_CONNECTIONS)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    sqlite::run_migrations(db.pool()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let hooks = notification_hooks(&config)?;
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let razorpay_api = razorpay_tools::RazorpayApi::new(config.razorpay.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = HttpServer::new(move || {
        let verifier = RazorpayVerifier::new(config.razorpay.key_secret.clone());
        let flow_api = DonationFlowApi::new(db.clone(), verifier.clone(), producers.clone());
        let volunteer_api = VolunteerApi::new(db.clone());
        let razorpay_api = razorpay_api.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("dps::access_log"))
            .app_data(web::Data::new(flow_api))
            .app_data(web::Data::new(volunteer_api))
            .app_data(web::Data::new(razorpay_api))
            .app_data(web::Data::new(verifier))
            .service(health)
            .service(create_order)
            .service(verify_payment)
            .service(ProcessPaymentRoute::<SqliteDatabase, RazorpayVerifier>::new())
            .service(SavePaymentRoute::<SqliteDatabase, RazorpayVerifier>::new())
            .service(DonationsRoute::<SqliteDatabase>::new())
    })
    .bind((host.as_str(), port))?
    .run();
    info!("🚀️ Server bound to {host}:{port}");
    Ok(srv)
}
