//! Declarative pair blueprints.
//!
//! [`PairConfig`] carries the parameters the factory stamps onto every pair
//! it creates.  Configs validate on construction; a successfully built
//! config always produces a valid pair.

mod pair_config;

pub use pair_config::PairConfig;
