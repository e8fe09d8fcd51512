//! Hello world: one character, a console render system and a birthday.
//!
//! Each tick the `age` system makes every character one year older and
//! announces round birthdays on the `birthday` event. The handler queues an
//! action that gives the character a `party` component, which appears in the
//! render output one tick later.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use entityped_engine::prelude::*;

const DEFAULT_AGE: u32 = 29;
const TICKS: usize = 3;

#[derive(Debug, Deserialize)]
struct CharacterInit {
    name: String,
    age: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Character {
    name: String,
    age: u32,
}

impl Component for Character {
    fn type_name() -> &'static str {
        "character"
    }
}

fn component_types() -> ComponentTypes {
    ComponentTypes::new()
        .with(ComponentKind::new("character", |init: CharacterInit| Character {
            name: init.name,
            age: init.age.unwrap_or(DEFAULT_AGE),
        }))
        .with(ComponentKind::new("party", |guests: u32| guests))
}

fn render_system() -> System<String> {
    System::injected("render", String::from("console"), |ctx| {
        let mut output = String::from("Characters:");
        for entity in ctx.entities.iter() {
            let Some(character) = entity.get::<Character>()? else {
                continue;
            };
            output.push_str(&format!("\nName: {} / Age: {}", character.name, character.age));
            if entity.has_component("party") {
                output.push_str(" (celebrating)");
            }
        }
        info!(target_surface = %ctx.inject, "{output}");
        Ok(())
    })
}

fn age_system() -> System {
    System::new("age", |ctx| {
        let characters = Query::new().include("character");
        let mut birthdays = Vec::new();
        for entity in ctx.entities.query_mut(&characters) {
            let mut character = entity
                .get::<Character>()?
                .context("queried entity has no character")?;
            character.age += 1;
            if character.age % 10 == 0 {
                birthdays.push(json!({ "entity": entity.id(), "age": character.age }));
            }
            entity.insert(&character)?;
        }
        for payload in &birthdays {
            ctx.dispatch("birthday", Some(payload))?;
        }
        Ok(())
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("hello_world=info".parse()?)
                .add_directive("entityped_engine::engine=debug".parse()?),
        )
        .init();

    let mut game = Engine::with_config(component_types(), EngineConfig::from_env());

    let actions = game.actions().clone();
    game.subscribe("birthday", move |payload| {
        let payload = payload.context("birthday without payload")?;
        let id = payload["entity"]
            .as_str()
            .context("birthday payload has no entity id")?
            .to_string();
        info!(entity = %id, age = %payload["age"], "round birthday");
        actions.queue(move |store| {
            if let Some(entity) = store.get_mut(&id) {
                entity.add_component(InitializedComponent::new("party", json!(12)));
            }
            Ok(())
        });
        Ok(())
    });

    let player = game.create_component("character", json!({ "name": "Mr. Hello World" }))?;
    game.add_entity(game.create_entity(None, [player]));

    game.add_system(render_system())?;
    game.add_system(age_system())?;
    game.enable_systems(["render", "age"])?;

    for _ in 0..TICKS {
        let report = game.update_systems()?;
        info!(tick = report.tick_id, actions = report.actions_run, "tick done");
    }

    game.debug();
    info!(state = %game, "final state");
    Ok(())
}
