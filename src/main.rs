use clap::Parser;
use staking_deploy::utils::{logger, validation::Validate};
use staking_deploy::{
    CliArgs, DeployConfig, DeployError, DeployOptions, Deployer, FsArtifactStore, GasReport,
    JsonRpcClient,
};

#[tokio::main]
async fn main() {
    // Variables already in the environment take precedence over .env.
    dotenvy::from_path(".env").ok();

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if let Err(e) = run(&args).await {
        tracing::debug!("Error category: {:?}", e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run(args: &CliArgs) -> Result<(), DeployError> {
    tracing::info!("📁 Loading configuration from: {}", args.config_path());
    let mut config = args.load_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if !config.unresolved.is_empty() {
        tracing::debug!(
            "Unset environment variables: {}",
            config.unresolved.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    let network_name = args.network_name(&config).to_string();
    let network = config.network(&network_name)?.clone();
    let options = DeployOptions::from_config(&config, &network_name);

    let client = JsonRpcClient::new(network.url.clone())?;
    let artifacts = FsArtifactStore::new(&config.deploy.artifacts);
    let deployer = Deployer::new(client, artifacts, network, options)?;

    if args.dry_run {
        let artifact = deployer.load_artifact()?;
        display_config_summary(&config, &network_name, &deployer.deployer_address().to_string());
        tracing::info!(
            "🔍 DRY RUN: {} ({} bytes of init code) would be deployed; nothing sent",
            artifact.contract_name,
            artifact.bytecode.trim_start_matches("0x").len() / 2
        );
        return Ok(());
    }

    let deployment = deployer.deploy().await?;
    tracing::info!(
        "✅ {} mined on {} in block {} (tx {})",
        deployment.contract,
        deployment.network,
        deployment.block_number,
        deployment.tx_hash
    );

    if config.gas_reporter_enabled() {
        tracing::info!("⛽ {}", GasReport::new(&deployment, &config.gas_reporter.currency));
    }

    println!("{} deployed to: {}", deployment.contract, deployment.address);
    Ok(())
}

fn display_config_summary(config: &DeployConfig, network: &str, deployer: &str) {
    let optimizer = &config.solidity.optimizer;
    eprintln!("📋 Configuration Summary:");
    eprintln!("  Contract: {}", config.deploy.contract);
    eprintln!("  Artifacts: {}", config.deploy.artifacts);
    eprintln!(
        "  Solidity: {} (optimizer {}, runs {})",
        config.solidity.version,
        if optimizer.enabled { "on" } else { "off" },
        optimizer.runs
    );
    eprintln!("  Network: {}", network);
    eprintln!("  Deployer: {}", deployer);
    eprintln!("  Confirmations: {}", config.deploy.confirmations);
    eprintln!(
        "  Gas reporter: {} ({})",
        config.gas_reporter_enabled(),
        config.gas_reporter.currency
    );
    if let Some(typechain) = &config.typechain {
        eprintln!(
            "  Typechain: {} (overloads: {})",
            typechain.target, typechain.always_generate_overloads
        );
    }
    let etherscan_key = config
        .etherscan
        .as_ref()
        .and_then(|e| e.api_key.as_ref())
        .is_some();
    eprintln!("  Etherscan API key: {}", if etherscan_key { "set" } else { "unset" });
    eprintln!();
}
