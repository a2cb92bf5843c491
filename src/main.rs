use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use serde_json::json;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use vnpay_client::domain::amount::Amount;
use vnpay_client::domain::callback::{ExpectedPayment, IpnAcknowledgement, parse_callback};
use vnpay_client::domain::intent::{BuildResponse, CANNOT_START_PAYMENT, PaymentIntent};
use vnpay_client::interfaces::csv::callback_reader::CallbackReader;
use vnpay_client::interfaces::csv::report_writer::{ReconciliationRow, ReportWriter};
use vnpay_client::{GatewayConfig, PaymentGateway, telemetry};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (also enabled by VNPAY_DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a payment request and print the redirect URL
    Build {
        /// Amount in major currency units
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        bank_code: Option<String>,
        #[arg(long)]
        locale: Option<String>,
        /// Client address candidate, may be repeated
        #[arg(long = "client-ip")]
        client_ips: Vec<String>,
        #[arg(long)]
        return_url: Option<String>,
    },
    /// Verify a callback given as a query string or full return URL
    Verify {
        input: String,
        /// Amount in minor units the order expects; enables the IPN reply
        #[arg(long)]
        expected_amount: Option<i64>,
    },
    /// Verify a CSV of captured callbacks and print a report
    Reconcile {
        /// CSV file with a `query` column and optional `expected_amount`
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GatewayConfig::from_env();
    telemetry::init(cli.verbose || config.debug);

    let gateway = PaymentGateway::new(config);

    match cli.command {
        Command::Build {
            amount,
            reference,
            description,
            bank_code,
            locale,
            client_ips,
            return_url,
        } => {
            let response = match Amount::parse(&amount) {
                Ok(amount) => {
                    let intent = PaymentIntent {
                        amount: Decimal::from(amount),
                        reference,
                        description,
                        return_url,
                        bank_code,
                        locale,
                        client_ips,
                    };
                    gateway.start_payment(&intent).await
                }
                Err(e) => BuildResponse::failure(&e),
            };

            println!("{}", serde_json::to_string_pretty(&response).into_diagnostic()?);
            if !response.is_success() {
                return Err(miette!("{CANNOT_START_PAYMENT}: {}", response.message));
            }
        }
        Command::Verify {
            input,
            expected_amount,
        } => {
            let params = parse_callback(&input).into_diagnostic()?;
            let expected = expected_amount.map(|amount_minor| ExpectedPayment {
                amount_minor,
                already_confirmed: false,
            });
            let result = gateway.verify_callback(&params);
            let acknowledgement =
                expected.map(|expected| IpnAcknowledgement::evaluate(&result, Some(expected)));

            let output = json!({
                "result": &result,
                "customer_message": result.customer_message(),
                "support_reference": result.support_reference(),
                "acknowledgement": acknowledgement,
            });
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        }
        Command::Reconcile { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = CallbackReader::new(file);
            let mut rows = Vec::new();

            for captured in reader.callbacks() {
                let captured = match captured {
                    Ok(captured) => captured,
                    Err(e) => {
                        eprintln!("Error reading callback: {}", e);
                        continue;
                    }
                };
                let params = match parse_callback(&captured.query) {
                    Ok(params) => params,
                    Err(e) => {
                        eprintln!("Error parsing callback: {}", e);
                        continue;
                    }
                };
                let expected = captured.expected_amount.map(|amount_minor| ExpectedPayment {
                    amount_minor,
                    already_confirmed: false,
                });
                let result = gateway.verify_callback(&params);
                let acknowledgement =
                    expected.map(|expected| IpnAcknowledgement::evaluate(&result, Some(expected)));
                rows.push(ReconciliationRow::new(&result, acknowledgement.as_ref()));
            }

            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_rows(rows).into_diagnostic()?;
        }
    }

    Ok(())
}
