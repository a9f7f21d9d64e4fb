//! Stripe integration via REST API (no SDK dependency)

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convert a major-unit price to minor units (cents), truncating like the
/// provider expects for integer amounts
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0) as i64
}

/// Create a PaymentIntent and return its client secret
pub async fn create_payment_intent(secret_key: &str, amount: i64) -> Result<String, BoxError> {
    let client = reqwest::Client::new();
    let amount = amount.to_string();
    let resp: serde_json::Value = client
        .post("https://api.stripe.com/v1/payment_intents")
        .basic_auth(secret_key, None::<&str>)
        .form(&[
            ("amount", amount.as_str()),
            ("currency", "usd"),
            ("payment_method_types[]", "card"),
        ])
        .send()
        .await?
        .json()
        .await?;

    resp["client_secret"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| format!("Stripe create_payment_intent failed: {resp}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_unit_conversion_truncates() {
        assert_eq!(to_minor_units(20.00), 2000);
        assert_eq!(to_minor_units(10.999), 1099);
        assert_eq!(to_minor_units(0.0), 0);
    }
}
