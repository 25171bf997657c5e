//! CLI tool for deploying and operating the staked vault contracts.

use odra::casper_types::U256;
use odra::host::HostEnv;
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};
use staked_vault_contracts::staking::StakedVault;
use staked_vault_contracts::token::Token;

/// Deploys the asset Token contract.
pub struct TokenDeployScript;

impl DeployScript for TokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use staked_vault_contracts::token::TokenInitArgs;

        let _token = Token::load_or_deploy(
            &env,
            TokenInitArgs {
                name: String::from("Staking Asset"),
                symbol: String::from("STK"),
                decimals: 18,
                initial_supply: U256::zero(),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the StakedVault over the deployed Token.
/// Requires Token to be deployed first.
pub struct StakedVaultDeployScript;

impl DeployScript for StakedVaultDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use staked_vault_contracts::staking::staked_vault::StakedVaultInitArgs;

        let token = container.contract_ref::<Token>(env)?;

        let _vault = StakedVault::load_or_deploy(
            &env,
            StakedVaultInitArgs {
                asset: token.address().clone(),
                name: String::from("Staked Asset"),
                symbol: String::from("sSTK"),
            },
            container,
            500_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys Token and StakedVault.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        TokenDeployScript.deploy(env, container)?;
        StakedVaultDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Scenario that starts a new rewards cycle over idle vault balance.
pub struct CreateRewardsCycleScenario;

impl Scenario for CreateRewardsCycleScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "amount",
                "Rewards to vest over the cycle",
                NamedCLType::U256,
            ),
            CommandArg::new(
                "end_timestamp",
                "Cycle end, unix seconds",
                NamedCLType::U64,
            ),
            CommandArg::new(
                "bps_yield_cap_per_second",
                "Yield cap scaled by 1e12, 0 disables it",
                NamedCLType::U64,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut vault = container.contract_ref::<StakedVault>(env)?;
        let amount = args.get_single::<U256>("amount")?;
        let end_timestamp = args.get_single::<u64>("end_timestamp")?;
        let cap = args.get_single::<u64>("bps_yield_cap_per_second")?;

        env.set_gas(50_000_000_000);
        vault.try_create_rewards_cycle(amount, end_timestamp, cap)?;

        println!("Rewards cycle of {} created, ending at {}", amount, end_timestamp);
        Ok(())
    }
}

impl ScenarioMetadata for CreateRewardsCycleScenario {
    const NAME: &'static str = "create-rewards-cycle";
    const DESCRIPTION: &'static str = "Starts vesting idle vault balance as rewards";
}

/// Scenario that settles vested rewards.
pub struct DistributeRewardsScenario;

impl Scenario for DistributeRewardsScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut vault = container.contract_ref::<StakedVault>(env)?;

        env.set_gas(30_000_000_000);
        vault.try_distribute_rewards()?;

        println!("Total assets: {}", vault.total_assets());
        Ok(())
    }
}

impl ScenarioMetadata for DistributeRewardsScenario {
    const NAME: &'static str = "distribute-rewards";
    const DESCRIPTION: &'static str = "Settles vested rewards into the vault's total assets";
}

/// Scenario that sends the capped surplus to a receiver.
pub struct WithdrawSurplusScenario;

impl Scenario for WithdrawSurplusScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "receiver",
            "Address receiving the surplus",
            NamedCLType::Key,
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut vault = container.contract_ref::<StakedVault>(env)?;
        let receiver = args.get_single::<Address>("receiver")?;

        env.set_gas(50_000_000_000);
        let amount = vault.try_withdraw_surplus_rewards(receiver)?;

        println!("Surplus withdrawn: {}", amount);
        Ok(())
    }
}

impl ScenarioMetadata for WithdrawSurplusScenario {
    const NAME: &'static str = "withdraw-surplus";
    const DESCRIPTION: &'static str = "Sends the rewards withheld by the yield cap to a receiver";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the staked vault contracts")
        // Deploy scripts
        .deploy(TokenDeployScript)
        .deploy(StakedVaultDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<Token>()
        .contract::<StakedVault>()
        // Scenarios
        .scenario(CreateRewardsCycleScenario)
        .scenario(DistributeRewardsScenario)
        .scenario(WithdrawSurplusScenario)
        .build()
        .run();
}
