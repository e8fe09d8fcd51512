//! End-to-end behaviour of the engine: entities, queries, the system
//! lifecycle, events and deferred actions working together.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use anyhow::Context;
use entityped_engine::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct CharacterInit {
    name: String,
    age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Character {
    name: String,
    age: u32,
}

impl Component for Character {
    fn type_name() -> &'static str {
        "character"
    }
}

fn components() -> ComponentTypes {
    ComponentTypes::new()
        .with(ComponentKind::new("character", |init: CharacterInit| Character {
            name: init.name,
            age: init.age.unwrap_or(10),
        }))
        .with(ComponentKind::new("poisoned", |turns: u32| turns))
}

fn ids(engine: &Engine, query: &Query) -> HashSet<String> {
    engine
        .entity_query(query)
        .keys()
        .map(|id| id.to_string())
        .collect()
}

#[test]
fn character_ages_every_tick() {
    let mut engine = Engine::new(components());
    let hero = engine
        .create_component("character", json!({"name": "Mr. Hello World"}))
        .unwrap();
    engine.add_entity(engine.create_entity(Some("hero".into()), [hero]));

    engine
        .add_system(System::new("age", |ctx| {
            for entity in ctx.entities.query_mut(&Query::new().include("character")) {
                let mut character = entity
                    .get::<Character>()?
                    .context("query guaranteed a character")?;
                character.age += 1;
                entity.insert(&character)?;
            }
            Ok(())
        }))
        .unwrap();
    engine.enable_systems(["age"]).unwrap();

    for _ in 0..3 {
        engine.update_systems().unwrap();
    }

    let hero = engine.entity_by_id("hero").unwrap();
    assert_eq!(
        hero.get::<Character>().unwrap(),
        Some(Character {
            name: "Mr. Hello World".into(),
            age: 13
        })
    );
}

#[test]
fn query_matches_component_presence() {
    let mut engine = Engine::new(components());
    for (id, names) in [("e1", &["a", "b"][..]), ("e2", &["a"][..]), ("e3", &["b"][..])] {
        let comps = names
            .iter()
            .map(|name| InitializedComponent::new(*name, Value::Null));
        engine.add_entity(Entity::create(Some(id.into()), comps));
    }

    let set = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<HashSet<_>>();
    assert_eq!(ids(&engine, &Query::new().include("a")), set(&["e1", "e2"]));
    assert_eq!(ids(&engine, &Query::new().include("a").exclude("b")), set(&["e2"]));
    assert_eq!(ids(&engine, &Query::new().exclude_id("e1")), set(&["e2", "e3"]));
}

#[test]
fn systems_update_in_registration_order_across_toggles() {
    let mut engine = Engine::new(components());
    let log = Rc::new(RefCell::new(Vec::new()));
    for name in ["s1", "s2"] {
        let l = Rc::clone(&log);
        engine
            .add_system(System::new(name, move |_| {
                l.borrow_mut().push(name);
                Ok(())
            }))
            .unwrap();
    }

    engine.enable_systems(["s2", "s1"]).unwrap();
    engine.update_systems().unwrap();
    engine.disable_systems(["s1"]).unwrap();
    engine.update_systems().unwrap();
    engine.enable_systems(["s1"]).unwrap();
    engine.update_systems().unwrap();

    assert_eq!(*log.borrow(), vec!["s1", "s2", "s2", "s1", "s2"]);
}

#[test]
fn enabling_unknown_system_touches_nothing() {
    let mut engine = Engine::new(components());
    engine.add_system(System::new("render", |_| Ok(()))).unwrap();

    let outcome = engine.enable_systems(["missing"]).unwrap();
    assert_eq!(outcome, vec![Toggle::NotFound]);
    assert_eq!(engine.systems().is_enabled("render"), Some(false));
    assert_eq!(engine.update_systems().unwrap().systems_updated, 0);
}

#[test]
fn events_fan_out_from_inside_a_system() {
    let mut engine = Engine::new(components());
    let received = Rc::new(RefCell::new(Vec::new()));

    let r = Rc::clone(&received);
    engine.subscribe("poison-tick", move |payload| {
        r.borrow_mut().push(("h1", payload.cloned()));
        Ok(())
    });
    let r = Rc::clone(&received);
    engine.subscribe("poison-tick", move |payload| {
        r.borrow_mut().push(("h2", payload.cloned()));
        Ok(())
    });

    let poisoned = engine.create_component("poisoned", json!(2)).unwrap();
    engine.add_entity(engine.create_entity(Some("victim".into()), [poisoned]));

    engine
        .add_system(System::new("poison", |ctx| {
            let victims = ctx.entities.query_ids(&Query::new().include("poisoned"));
            for id in victims {
                ctx.dispatch("poison-tick", Some(&json!({ "entity": id })))?;
            }
            Ok(())
        }))
        .unwrap();
    engine.enable_systems(["poison"]).unwrap();
    engine.update_systems().unwrap();

    let payload = json!({"entity": "victim"});
    assert_eq!(
        *received.borrow(),
        vec![("h1", Some(payload.clone())), ("h2", Some(payload))]
    );
    assert_eq!(engine.dispatch("nobody-listens", None).unwrap(), 0);
}

#[test]
fn handler_defers_removal_through_action_queue() {
    let mut engine = Engine::new(components());
    engine.add_entity(Entity::with_id("doomed"));

    let actions = engine.actions().clone();
    engine.subscribe("kill", move |payload| {
        let id = payload
            .and_then(Value::as_str)
            .context("kill needs an entity id")?
            .to_string();
        actions.queue(move |store| {
            store.remove_by_id(&id);
            Ok(())
        });
        Ok(())
    });

    engine.dispatch("kill", Some(&json!("doomed"))).unwrap();
    assert!(engine.entity_by_id("doomed").is_some());

    let report = engine.update_systems().unwrap();
    assert_eq!(report.actions_run, 1);
    assert!(engine.entity_by_id("doomed").is_none());
}

#[test]
fn init_runs_once_before_first_update_each_enable_period() {
    let mut engine = Engine::new(components());
    let log = Rc::new(RefCell::new(Vec::new()));
    let (li, lu, ld) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
    engine
        .add_system(
            System::injected("render", String::from("#canvas"), move |ctx| {
                lu.borrow_mut().push(format!("update {}", ctx.inject));
                Ok(())
            })
            .on_init(move |_| {
                li.borrow_mut().push("init".to_string());
                Ok(())
            })
            .on_destroy(move |_| {
                ld.borrow_mut().push("destroy".to_string());
                Ok(())
            }),
        )
        .unwrap();

    engine.enable_systems(["render"]).unwrap();
    engine.update_systems().unwrap();
    engine.disable_systems(["render"]).unwrap();
    engine.update_systems().unwrap();
    engine.enable_systems(["render"]).unwrap();
    engine.update_systems().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "init",
            "update #canvas",
            "destroy",
            "init",
            "update #canvas"
        ]
    );
}
