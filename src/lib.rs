pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod telemetry;

pub use application::gateway::PaymentGateway;
pub use application::{build_payment_request, verify_callback};
pub use domain::callback::{CallbackResult, ExpectedPayment, IpnAcknowledgement};
pub use domain::config::GatewayConfig;
pub use domain::intent::{BuildResponse, PaymentIntent, SignedRequest};
pub use error::{PaymentError, Result};
