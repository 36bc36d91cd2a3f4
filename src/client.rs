use aws_config::Region;
use aws_sdk_sqs::config::SharedCredentialsProvider;

use crate::config::SqsConfig;

/// Builds an AWS SQS client for the configured queue.
///
/// When the config carries a static key/secret pair, the client is built from
/// those credentials and the configured region. Otherwise the ambient AWS
/// credential chain is used (environment variables such as
/// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_REGION`, instance
/// profiles, shared config files).
pub async fn build_client(config: &SqsConfig) -> aws_sdk_sqs::Client {
    if config.has_static_credentials() {
        create_client_with_credentials(
            config.api_key.as_deref().unwrap_or_default(),
            config.secret_key.as_deref().unwrap_or_default(),
            &config.region,
        )
    } else {
        let sdk_config = aws_config::from_env()
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        aws_sdk_sqs::Client::new(&sdk_config)
    }
}

/// Creates an AWS SQS client with explicitly provided credentials and region.
pub fn create_client_with_credentials(
    access_key_id: &str,
    secret_access_key: &str,
    region: &str,
) -> aws_sdk_sqs::Client {
    let credentials =
        aws_sdk_sqs::config::Credentials::new(access_key_id, secret_access_key, None, None, "aws");

    let shared_credentials = SharedCredentialsProvider::new(credentials);

    let config = aws_sdk_sqs::config::Builder::new()
        .region(Region::new(region.to_string()))
        .credentials_provider(shared_credentials)
        .build();

    aws_sdk_sqs::Client::from_conf(config)
}
