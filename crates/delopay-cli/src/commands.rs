//! Command definitions and dispatch.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use delopay::{
    ClientOptions, CreatePaymentRequest, DelopayClient, RefundPaymentRequest,
    StripePaymentMethodsQuery, UpdatePaymentRequest,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Command-line access to the Delopay payments API.
///
/// The API key is read from `DELOPAY_API_KEY` (a `.env` file is honoured).
#[derive(Debug, Parser)]
#[command(name = "delopay", version, about)]
pub struct Cli {
    /// Override the API base URL
    #[arg(long, global = true, env = "DELOPAY_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Payment operations
    #[command(subcommand)]
    Payments(PaymentsCommand),

    /// Provider discovery
    #[command(subcommand)]
    Providers(ProvidersCommand),
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// Create a payment
    Create(CreateArgs),

    /// Fetch a payment by id
    Get { payment_id: String },

    /// Fetch a payment by client order id
    ByOrder { client_order_id: String },

    /// Update mutable payment fields
    Update(UpdateArgs),

    /// Capture an authorized payment
    Capture { payment_id: String },

    /// Refund a payment, fully or partially
    Refund {
        payment_id: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Redeliver failed merchant callbacks
    ResendCallbacks,
}

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// List configured providers
    List,

    /// Show the client-side config for a provider
    ClientConfig { provider_id: String },

    /// List Stripe payment methods for a country pairing
    StripeMethods {
        #[arg(long)]
        merchant_country: String,
        #[arg(long)]
        customer_country: String,
        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub client_order_id: String,
    #[arg(long)]
    pub provider: String,
    #[arg(long)]
    pub amount: f64,
    #[arg(long)]
    pub currency: String,
    #[arg(long)]
    pub success_url: String,
    #[arg(long)]
    pub cancel_url: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub customer_email: Option<String>,
    #[arg(long)]
    pub callback_url: Option<String>,
    /// Metadata as a JSON object
    #[arg(long, value_parser = parse_metadata)]
    pub metadata: Option<Map<String, Value>>,
    #[arg(long)]
    pub auto_capture: Option<bool>,
}

impl From<CreateArgs> for CreatePaymentRequest {
    fn from(args: CreateArgs) -> Self {
        let mut request = CreatePaymentRequest::new(
            args.client_order_id,
            args.provider,
            args.amount,
            args.currency,
            args.success_url,
            args.cancel_url,
        );
        request.description = args.description;
        request.customer_email = args.customer_email;
        request.callback_url = args.callback_url;
        request.metadata = args.metadata;
        request.auto_capture = args.auto_capture;
        request
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub payment_id: String,
    #[arg(long, value_parser = parse_metadata)]
    pub metadata: Option<Map<String, Value>>,
    #[arg(long)]
    pub callback_url: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub customer_email: Option<String>,
    #[arg(long)]
    pub amount: Option<f64>,
    #[arg(long)]
    pub amount_paid: Option<f64>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl UpdateArgs {
    fn into_parts(self) -> (String, UpdatePaymentRequest) {
        let request = UpdatePaymentRequest {
            metadata: self.metadata,
            callback_url: self.callback_url,
            description: self.description,
            customer_email: self.customer_email,
            amount: self.amount,
            amount_paid: self.amount_paid,
            currency: self.currency,
            status: self.status,
        };
        (self.payment_id, request)
    }
}

fn parse_metadata(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("metadata must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

impl Cli {
    /// Build the client from the environment plus flags
    pub fn client(&self) -> Result<DelopayClient> {
        let mut options = ClientOptions::from_env().context("loading Delopay configuration")?;
        if let Some(ref base_url) = self.base_url {
            options = options.with_base_url(base_url.clone());
        }
        debug!(?options, "Resolved client options");
        Ok(DelopayClient::new(options)?)
    }

    /// Run the selected command and return its JSON output
    pub async fn run(self, client: &DelopayClient) -> Result<String> {
        match self.command {
            Command::Payments(command) => run_payments(client, command).await,
            Command::Providers(command) => run_providers(client, command).await,
        }
    }
}

async fn run_payments(client: &DelopayClient, command: PaymentsCommand) -> Result<String> {
    let payments = client.payments();
    match command {
        PaymentsCommand::Create(args) => render(&payments.create(&args.into()).await?),
        PaymentsCommand::Get { payment_id } => render(&payments.get(&payment_id).await?),
        PaymentsCommand::ByOrder { client_order_id } => {
            render(&payments.get_by_order(&client_order_id).await?)
        }
        PaymentsCommand::Update(args) => {
            let (payment_id, request) = args.into_parts();
            render(&payments.update(&payment_id, &request).await?)
        }
        PaymentsCommand::Capture { payment_id } => render(&payments.capture(&payment_id).await?),
        PaymentsCommand::Refund {
            payment_id,
            amount,
            reason,
        } => {
            let request = RefundPaymentRequest { amount, reason };
            render(&payments.refund(&payment_id, &request).await?)
        }
        PaymentsCommand::ResendCallbacks => render(&payments.resend_failed_callbacks().await?),
    }
}

async fn run_providers(client: &DelopayClient, command: ProvidersCommand) -> Result<String> {
    let providers = client.providers();
    match command {
        ProvidersCommand::List => render(&providers.list().await?),
        ProvidersCommand::ClientConfig { provider_id } => {
            render(&providers.get_client_config(&provider_id).await?)
        }
        ProvidersCommand::StripeMethods {
            merchant_country,
            customer_country,
            currency,
        } => {
            let query = StripePaymentMethodsQuery {
                merchant_country,
                customer_country,
                currency,
            };
            render(&providers.get_stripe_payment_methods(&query).await?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
