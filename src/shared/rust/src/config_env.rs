/* src/shared/rust/src/config_env.rs */

//! Where the code behind a configuration name is allowed to run.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrellisError};
use crate::suggest::did_you_mean;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigEnv {
  #[serde(rename = "client-only")]
  ClientOnly,
  #[serde(rename = "server-only")]
  ServerOnly,
  #[serde(rename = "server-and-client")]
  ServerAndClient,
  /// Read at build time only, never imported at runtime.
  #[serde(rename = "config-only")]
  ConfigOnly,
  /// Only informs routing.
  #[serde(rename = "_routing-env")]
  RoutingEnv,
}

/// Target side of a generated module or a runtime load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
  Client,
  Server,
}

impl Side {
  pub fn from_is_client(is_for_client_side: bool) -> Self {
    if is_for_client_side { Self::Client } else { Self::Server }
  }

  pub fn is_client(self) -> bool {
    self == Self::Client
  }

  pub fn opposite(self) -> Self {
    match self {
      Self::Client => Self::Server,
      Self::Server => Self::Client,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Client => "client",
      Self::Server => "server",
    }
  }
}

impl ConfigEnv {
  pub const ALL: [ConfigEnv; 5] =
    [Self::ClientOnly, Self::ServerOnly, Self::ServerAndClient, Self::ConfigOnly, Self::RoutingEnv];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::ClientOnly => "client-only",
      Self::ServerOnly => "server-only",
      Self::ServerAndClient => "server-and-client",
      Self::ConfigOnly => "config-only",
      Self::RoutingEnv => "_routing-env",
    }
  }

  /// The env whose code lives exclusively on `side`.
  pub fn only(side: Side) -> Self {
    match side {
      Side::Client => Self::ClientOnly,
      Side::Server => Self::ServerOnly,
    }
  }

  /// Whether elements with this env are imported by the generated module for `side`.
  pub fn is_loaded_on(self, side: Side) -> bool {
    match self {
      Self::ConfigOnly | Self::RoutingEnv => false,
      Self::ServerAndClient => true,
      env => env != Self::only(side.opposite()),
    }
  }
}

impl fmt::Display for ConfigEnv {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ConfigEnv {
  type Err = TrellisError;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL.into_iter().find(|env| env.as_str() == s).ok_or_else(|| {
      let all: Vec<_> = Self::ALL.iter().map(|e| format!("`{e}`")).collect();
      TrellisError::usage(format!("unknown env `{s}`: it should be one of {}", all.join(", ")))
    })
  }
}

const BUILT_IN: &[(&str, ConfigEnv)] = &[
  ("Page", ConfigEnv::ServerAndClient),
  ("Layout", ConfigEnv::ServerAndClient),
  ("Wrapper", ConfigEnv::ServerAndClient),
  ("onBeforeRender", ConfigEnv::ServerAndClient),
  ("onRenderHtml", ConfigEnv::ServerOnly),
  ("onBeforePrerenderStart", ConfigEnv::ServerOnly),
  ("passToClient", ConfigEnv::ServerOnly),
  ("Head", ConfigEnv::ServerOnly),
  ("guard", ConfigEnv::ServerOnly),
  ("onRenderClient", ConfigEnv::ClientOnly),
  ("onHydrationEnd", ConfigEnv::ClientOnly),
  ("onPageTransitionStart", ConfigEnv::ClientOnly),
  ("onPageTransitionEnd", ConfigEnv::ClientOnly),
  ("title", ConfigEnv::ConfigOnly),
  ("clientRouting", ConfigEnv::ConfigOnly),
  ("prerender", ConfigEnv::ConfigOnly),
  ("filesystemRoutingRoot", ConfigEnv::ConfigOnly),
  ("route", ConfigEnv::RoutingEnv),
  ("isErrorPage", ConfigEnv::RoutingEnv),
  ("iKnowThePerformanceRisksOfAsyncRouteFunctions", ConfigEnv::RoutingEnv),
];

/// The closed set of configuration names and their fixed env.
#[derive(Debug, Clone)]
pub struct ConfigDefinitions {
  defs: IndexMap<String, ConfigEnv>,
}

impl Default for ConfigDefinitions {
  fn default() -> Self {
    Self::builtin()
  }
}

impl ConfigDefinitions {
  pub fn builtin() -> Self {
    Self { defs: BUILT_IN.iter().map(|(name, env)| ((*name).to_string(), *env)).collect() }
  }

  pub fn is_builtin(name: &str) -> bool {
    BUILT_IN.iter().any(|(n, _)| *n == name)
  }

  /// Register a project-specific configuration name.
  pub fn define(&mut self, name: &str, env: ConfigEnv) -> Result<()> {
    if Self::is_builtin(name) {
      return Err(TrellisError::usage(format!(
        "custom config `{name}` collides with the built-in config of the same name"
      )));
    }
    if !is_valid_config_name(name) {
      return Err(TrellisError::usage(format!(
        "custom config name `{name}` is invalid: use letters, digits and `_` only"
      )));
    }
    self.defs.insert(name.to_string(), env);
    Ok(())
  }

  pub fn classify(&self, name: &str) -> Option<ConfigEnv> {
    self.defs.get(name).copied()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.defs.keys().map(String::as_str)
  }

  /// A declared env is legal when it equals the fixed env, or narrows a
  /// both-sides name down to one side.
  pub fn is_env_allowed(&self, name: &str, declared: ConfigEnv) -> bool {
    match self.classify(name) {
      Some(fixed) if fixed == declared => true,
      Some(ConfigEnv::ServerAndClient) => {
        matches!(declared, ConfigEnv::ClientOnly | ConfigEnv::ServerOnly)
      }
      _ => false,
    }
  }

  /// Effective env of an element, validating name and declared env.
  pub fn resolve_env(
    &self,
    name: &str,
    declared: Option<ConfigEnv>,
    defined_at: &str,
  ) -> Result<ConfigEnv> {
    let Some(fixed) = self.classify(name) else {
      let names: Vec<&str> = self.names().collect();
      let hint = match did_you_mean(name, &names) {
        Some(s) => format!(", did you mean `{s}`?"),
        None => String::new(),
      };
      return Err(TrellisError::usage(format!("{defined_at}: unknown config `{name}`{hint}")));
    };
    match declared {
      None => Ok(fixed),
      Some(env) if self.is_env_allowed(name, env) => Ok(env),
      Some(env) => Err(TrellisError::usage(format!(
        "{defined_at} declares env `{env}` but `{name}` is a `{fixed}` config"
      ))),
    }
  }
}

fn is_valid_config_name(name: &str) -> bool {
  let mut chars = name.chars();
  chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
