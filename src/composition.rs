//! Builds the list screens and the services behind them.

use std::{collections::HashSet, str::FromStr, sync::Arc};

use strum::{Display, EnumIter, EnumString};
use tracing::info;

use crate::{
  action::Action,
  components::{ListController, RetryPolicy},
  config::Config,
  dispatcher::Dispatcher,
  error::Error,
  items::{Card, Friend, Item, ManagedItem, Transfer},
  loaders::{CacheSink, DemoApi, Fixtures, ItemLoader, MemoryCache, NullCache},
  services::{
    ItemService, ItemServiceExt, SelectSink,
    adapters::{CardsServiceAdapter, FriendsCacheServiceAdapter, FriendsServiceAdapter, TransfersServiceAdapter},
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Screen {
  Friends,
  Sent,
  Received,
  Cards,
}

impl Screen {
  pub fn title(&self) -> &'static str {
    match self {
      Screen::Friends => "Friends",
      Screen::Sent => "Sent",
      Screen::Received => "Received",
      Screen::Cards => "Cards",
    }
  }
}

/// Resolves the configured tab names, in order. Each screen may appear once,
/// since completions are routed to the list showing their screen.
pub fn parse_screens(tabs: &[String]) -> Result<Vec<Screen>, Error> {
  if tabs.is_empty() {
    return Err(Error::Configuration("No tabs configured".to_string()));
  }

  let mut seen = HashSet::new();
  tabs
    .iter()
    .map(|tab| {
      let screen =
        Screen::from_str(tab).map_err(|_| Error::Configuration(format!("Unknown tab '{}'", tab)))?;
      if !seen.insert(screen) {
        return Err(Error::Configuration(format!("Tab '{}' is configured more than once", tab)));
      }
      Ok(screen)
    })
    .collect()
}

/// Everything the screens are built from.
pub struct Dependencies {
  pub friends_api: Arc<dyn ItemLoader<Friend>>,
  pub cards_api: Arc<dyn ItemLoader<Card>>,
  pub transfers_api: Arc<dyn ItemLoader<Transfer>>,
  pub friends_cache: Arc<MemoryCache<Friend>>,
  pub is_premium: bool,
  pub network_retries: usize,
}

impl Dependencies {
  pub fn from_config(config: &Config) -> Result<Self, Error> {
    let api = Arc::new(
      DemoApi::new(Fixtures::bundled()?)
        .with_latency(config.network.latency())
        .offline(config.network.offline)
        .with_flaky_calls(config.network.flaky_calls),
    );
    info!(
      "Using demo API with {}ms latency, offline: {}, premium user: {}",
      config.network.latency_ms, config.network.offline, config.user.premium
    );

    Ok(Self {
      friends_api: api.clone(),
      cards_api: api.clone(),
      transfers_api: api,
      friends_cache: Arc::new(MemoryCache::new()),
      is_premium: config.user.premium,
      network_retries: config.network.retries,
    })
  }
}

/// Builds the controller for `screen`. Selections are reported to the loop
/// behind `dispatcher` as [`Action::ItemSelected`].
pub fn make_list(screen: Screen, deps: &Dependencies, dispatcher: &Dispatcher) -> ListController {
  let retry_policy = match screen {
    Screen::Sent | Screen::Received => RetryPolicy::retry(1),
    Screen::Friends | Screen::Cards => RetryPolicy::disabled(),
  };
  ListController::new(screen, make_service(screen, deps, dispatcher), retry_policy)
}

pub fn make_service(screen: Screen, deps: &Dependencies, dispatcher: &Dispatcher) -> Arc<dyn ItemService> {
  let retries = deps.network_retries;
  match screen {
    Screen::Friends => {
      let select: SelectSink<Friend> = select_sink(dispatcher);
      let cache: Arc<dyn CacheSink<Friend>> =
        if deps.is_premium { deps.friends_cache.clone() } else { Arc::new(NullCache) };
      let api = FriendsServiceAdapter::new(deps.friends_api.clone(), cache, deps.is_premium, select.clone())
        .retry(retries);

      if deps.is_premium {
        Arc::new(api.fallback(FriendsCacheServiceAdapter::new(deps.friends_cache.clone(), select)))
      } else {
        api
      }
    },
    Screen::Sent => {
      TransfersServiceAdapter::sent(deps.transfers_api.clone(), select_sink(dispatcher)).retry(retries)
    },
    Screen::Received => {
      TransfersServiceAdapter::received(deps.transfers_api.clone(), select_sink(dispatcher))
        .retry(retries)
    },
    Screen::Cards => {
      CardsServiceAdapter::new(deps.cards_api.clone(), select_sink(dispatcher)).retry(retries)
    },
  }
}

fn select_sink<T: ManagedItem + Into<Item>>(dispatcher: &Dispatcher) -> SelectSink<T> {
  let dispatcher = dispatcher.clone();
  Arc::new(move |item: T| dispatcher.send(Action::ItemSelected(item.into())))
}
