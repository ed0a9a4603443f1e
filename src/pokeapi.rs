use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::config::ApiConfig;
use crate::error::{DexError, Result};
use crate::types::{self, Ability, DetailRecord, ListItem, Stat, TypeSlot};

pub struct PokeApi {
    client: Client,
    base_url: String,
    sprite_base: String,
}

impl std::fmt::Debug for PokeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PokeApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("dex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DexError::Api(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sprite_base: config.sprite_base.clone(),
        })
    }

    fn list_url(&self, limit: u32) -> String {
        format!("{}/pokemon?limit={}", self.base_url, limit)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(DexError::Api(format!("PokeAPI {}: {}", status, text)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// PokeAPI response types

#[derive(Deserialize)]
struct PaListPage {
    results: Vec<ListItem>,
}

#[derive(Deserialize)]
struct PaPokemon {
    name: String,
    id: u32,
    height: u32,
    weight: u32,
    #[serde(default)]
    abilities: Vec<PaAbilitySlot>,
    #[serde(default)]
    stats: Vec<PaStat>,
    #[serde(default)]
    types: Vec<PaTypeSlot>,
}

#[derive(Deserialize)]
struct PaNamed {
    name: String,
}

#[derive(Deserialize)]
struct PaAbilitySlot {
    ability: PaNamed,
}

#[derive(Deserialize)]
struct PaStat {
    base_stat: u32,
    stat: PaNamed,
}

#[derive(Deserialize)]
struct PaTypeSlot {
    #[serde(rename = "type")]
    type_field: PaNamed,
}

impl From<PaPokemon> for DetailRecord {
    fn from(p: PaPokemon) -> Self {
        DetailRecord {
            name: p.name,
            id: p.id,
            height: p.height,
            weight: p.weight,
            abilities: p
                .abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                })
                .collect(),
            stats: p
                .stats
                .into_iter()
                .map(|s| Stat {
                    base_stat: s.base_stat,
                    stat_name: s.stat.name,
                })
                .collect(),
            types: p
                .types
                .into_iter()
                .map(|t| TypeSlot {
                    type_name: t.type_field.name,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Catalog for PokeApi {
    fn name(&self) -> &str {
        "PokeAPI"
    }

    fn artwork_url(&self, id: u32) -> String {
        types::artwork_url(&self.sprite_base, id)
    }

    async fn list(&self, limit: u32) -> Result<Vec<ListItem>> {
        let page: PaListPage = self.get_json(&self.list_url(limit)).await?;
        Ok(page.results)
    }

    async fn detail(&self, url: &str) -> Result<DetailRecord> {
        let pokemon: PaPokemon = self.get_json(url).await?;
        Ok(pokemon.into())
    }
}
