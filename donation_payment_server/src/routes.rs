//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module
//! neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current
//! thread will stop that worker from processing new requests. Any long, non-cpu-bound operation
//! (I/O, database calls) must therefore be expressed as a future and awaited, never blocked on.
//! The one CPU-bound step in this server, signature verification, is a single HMAC and is fine
//! inline.

use actix_web::{get, post, web, HttpResponse, Responder};
use donation_payment_engine::{
    traits::{ConfirmationVerifier, LedgerDatabase, VolunteerManagement},
    DonationFlowApi,
    IngestOutcome,
    VolunteerApi,
};
use dpg_common::{helpers::non_blank, Paise};
use log::*;
use razorpay_tools::RazorpayApi;
use serde_json::json;

use crate::{
    data_objects::{
        CreateOrderRequest,
        CreateOrderResponse,
        DonationQuery,
        DonationView,
        JsonResponse,
        ProcessPaymentRequest,
        SavePaymentRequest,
        VerifyPaymentRequest,
    },
    errors::ServerError,
    integrations::razorpay::{new_order_request, RazorpayVerifier},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//--------------------------------------------   Create order  -------------------------------------------------
/// Create a gateway order for a donation.
///
/// The client sends the donor details and the amount in whole rupees; the response carries the
/// gateway order id and key id it needs to open the checkout widget. Nothing is persisted here;
/// the donation only enters the ledger once its confirmation passes `/process-payment`.
#[post("/create-order")]
pub async fn create_order(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<RazorpayApi>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let Some(rupees) = req.amount else {
        return Err(ServerError::ValidationError("Amount is required".to_string()));
    };
    if rupees <= 0 {
        return Err(ServerError::ValidationError(format!("Invalid amount: {rupees}")));
    }
    let amount = Paise::from_rupees(rupees);
    trace!("💻️ POST create-order for {amount}");
    let order = api.create_order(new_order_request(&req, amount)).await?;
    let name = if req.anonymous.unwrap_or_default() {
        "Anonymous Donor".to_string()
    } else {
        non_blank(req.name).unwrap_or_else(|| "Donor".to_string())
    };
    debug!("💻️ Gateway order [{}] created for {amount}", order.id);
    let response = CreateOrderResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key: api.key_id().to_string(),
        name,
    };
    Ok(HttpResponse::Ok().json(response))
}

//-------------------------------------------   Verify payment  ------------------------------------------------
/// Stateless signature verification: recompute the HMAC over the order/payment id pair and
/// compare. Nothing is persisted; clients use this as a pre-flight check before the full
/// `/process-payment` call.
#[post("/verify-payment")]
pub async fn verify_payment(
    body: web::Json<VerifyPaymentRequest>,
    verifier: web::Data<RazorpayVerifier>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let (Some(order_id), Some(payment_id), Some(signature)) = (
        non_blank(req.razorpay_order_id),
        non_blank(req.razorpay_payment_id),
        non_blank(req.razorpay_signature),
    ) else {
        return Err(ServerError::ValidationError("Missing payment verification parameters".to_string()));
    };
    if verifier.verify(&order_id, &payment_id, &signature) {
        trace!("💻️ Signature for order [{order_id}] verified");
        Ok(HttpResponse::Ok().json(json!({ "status": "Payment verified successfully" })))
    } else {
        warn!("💻️🔐️ /verify-payment received an invalid signature for order [{order_id}]");
        Err(ServerError::InvalidSignature)
    }
}

//-------------------------------------------   Process payment  -----------------------------------------------
route!(process_payment => Post "/process-payment" impl LedgerDatabase, ConfirmationVerifier);
/// The canonical payment-confirmation endpoint. Runs the full ingestion protocol:
/// validate → verify signature → atomic dedup/persist/aggregate → post-commit notification.
///
/// Responds 200 both for a fresh persist and for a duplicate delivery (the gateway may redeliver
/// and clients may retry; both are safe), 400 when validation or the signature check fails, and
/// 500 when the store aborts the transaction.
pub async fn process_payment<B, V>(
    body: web::Json<ProcessPaymentRequest>,
    api: web::Data<DonationFlowApi<B, V>>,
) -> Result<HttpResponse, ServerError>
where
    B: LedgerDatabase + 'static,
    V: ConfirmationVerifier + 'static,
{
    let confirmation = body.into_inner().into_confirmation();
    debug!("💻️ POST process-payment for payment [{}]", confirmation.donation.payment_id);
    // The flow runs on its own task: once the gateway has charged the card, a client hanging up
    // must not abort the transaction mid-flight.
    let api = api.clone();
    let outcome = actix_web::rt::spawn(async move { api.ingest(confirmation).await })
        .await
        .map_err(|e| ServerError::Unspecified(format!("Ingestion task panicked: {e}")))??;
    let message = match &outcome {
        IngestOutcome::Persisted(_) => "Payment verified and processed successfully",
        IngestOutcome::Duplicate(_) => "Payment already processed",
    };
    Ok(HttpResponse::Ok().json(JsonResponse::success(message)))
}

//--------------------------------------------   Save payment  -------------------------------------------------
route!(save_payment => Post "/save-payment" impl LedgerDatabase, ConfirmationVerifier);
/// Deprecated legacy endpoint, superseded by `/process-payment`. Old clients never sent a
/// gateway signature, so none is checked here; everything else goes through the same
/// transactional path, which keeps even legacy traffic idempotent and free of partial writes.
pub async fn save_payment<B, V>(
    body: web::Json<SavePaymentRequest>,
    api: web::Data<DonationFlowApi<B, V>>,
) -> Result<HttpResponse, ServerError>
where
    B: LedgerDatabase + 'static,
    V: ConfirmationVerifier + 'static,
{
    warn!("💻️ /save-payment is deprecated and performs no signature verification. Point clients at /process-payment.");
    let donation = body.into_inner().into_new_donation();
    let api = api.clone();
    let _outcome = actix_web::rt::spawn(async move { api.ingest_legacy(donation).await })
        .await
        .map_err(|e| ServerError::Unspecified(format!("Ingestion task panicked: {e}")))??;
    Ok(HttpResponse::Created().json(JsonResponse::success("Payment saved successfully!")))
}

//----------------------------------------------   Donations  --------------------------------------------------
route!(donations => Get "/donations" impl VolunteerManagement);
/// Donation listing for the dashboard, newest first. `?username=` filters to one volunteer's
/// attributed donations.
pub async fn donations<B: VolunteerManagement + 'static>(
    query: web::Query<DonationQuery>,
    api: web::Data<VolunteerApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let username = query.into_inner().username;
    debug!("💻️ GET donations for {}", username.as_deref().unwrap_or("all volunteers"));
    let donations = api.donations(username.as_deref()).await.map_err(|e| {
        debug!("💻️ Could not fetch donations. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    let views = donations.into_iter().map(DonationView::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(views))
}
