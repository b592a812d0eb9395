//! Production backends for [`EngineBuilder`].

use swiftx_chain::implementations::evm::alloy as evm;
use swiftx_config::Config;
use swiftx_core::EngineBuilder;
use swiftx_quote::implementations::{mayan, pyth};
use swiftx_storage::implementations::{file, memory};

/// An engine builder with every shipped backend registered under its config
/// name.
pub fn engine_builder(config: Config) -> EngineBuilder {
	EngineBuilder::new(config)
		.with_storage_factory("file", file::create_storage)
		.with_storage_factory("memory", memory::create_storage)
		.with_chain_factory(evm::create_chain)
		.with_quote_factory("mayan", mayan::create_quote)
		.with_price_feed_factory("pyth", pyth::create_price_feed)
}
