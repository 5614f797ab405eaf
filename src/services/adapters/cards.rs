use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::{
  error::Error,
  items::{Card, format::mask_card_number},
  loaders::ItemLoader,
  services::{ItemService, Row, SelectSink},
};

pub fn card_row(card: Card, select: &SelectSink<Card>) -> Row {
  Row::for_item(mask_card_number(&card.number), card.holder.clone(), card, select)
}

pub struct CardsServiceAdapter {
  loader: Arc<dyn ItemLoader<Card>>,
  select: SelectSink<Card>,
}

impl CardsServiceAdapter {
  pub fn new(loader: Arc<dyn ItemLoader<Card>>, select: SelectSink<Card>) -> Self {
    Self { loader, select }
  }
}

#[async_trait]
impl ItemService for CardsServiceAdapter {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    let cards = self.loader.load().await?;
    info!("Loaded {} cards", cards.len());
    Ok(cards.into_iter().map(|card| card_row(card, &self.select)).collect())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use pretty_assertions::assert_eq;

  use super::*;
  use crate::loaders::mock::ScriptedLoader;

  #[tokio::test]
  async fn test_rows_show_masked_number_and_holder() {
    let loader = Arc::new(ScriptedLoader::succeeding(vec![Card::new("4111 1111 1111 1234", "Ana Souza")]));
    let adapter = CardsServiceAdapter::new(loader, Arc::new(|_| {}));

    let rows = adapter.load_items().await.unwrap();

    assert_eq!(rows[0].title, "•••• 1234");
    assert_eq!(rows[0].subtitle, "Ana Souza");
  }

  #[tokio::test]
  async fn test_selection_receives_unmasked_card() {
    let selected = Arc::new(Mutex::new(Vec::new()));
    let sink_selected = selected.clone();
    let loader = Arc::new(ScriptedLoader::succeeding(vec![Card::new("4111 1111 1111 1234", "Ana Souza")]));
    let adapter = CardsServiceAdapter::new(loader, Arc::new(move |card| sink_selected.lock().unwrap().push(card)));

    adapter.load_items().await.unwrap()[0].select();

    assert_eq!(*selected.lock().unwrap(), vec![Card::new("4111 1111 1111 1234", "Ana Souza")]);
  }
}
