use std::rc::Rc;

use email_delivery::{EmailDelivery, EmailJsClient, EmailJsConfig, MissingEmailDelivery};
use tracing::{error, info};

/// The EmailJS client for `config`, or a delivery that always fails when
/// the configuration is unusable. The page keeps working either way.
pub fn delivery_for(config: &EmailJsConfig) -> Rc<dyn EmailDelivery> {
    match EmailJsClient::new(config.clone()) {
        Ok(client) => {
            info!(endpoint = %client.endpoint(), "email delivery ready");
            Rc::new(client)
        }
        Err(err) => {
            error!(error = %err, "email delivery disabled");
            Rc::new(MissingEmailDelivery)
        }
    }
}
