//! Static profession catalog and transition graph, compiled into the binary.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::careers::models::{CareerTransitionEdge, CareerTransitionGraph, Profession};

const PROFESSIONS_JSON: &str = include_str!("../../seed/professions.json");
const TRANSITIONS_JSON: &str = include_str!("../../seed/transitions.json");

#[derive(Debug, Clone)]
pub struct CareerSeed {
    professions: Vec<Profession>,
    by_id: HashMap<String, usize>,
    transitions: Vec<CareerTransitionEdge>,
}

impl CareerSeed {
    pub fn load() -> Result<Self> {
        let professions = serde_json::from_str(PROFESSIONS_JSON)
            .context("Embedded profession seed is invalid")?;
        let transitions = serde_json::from_str(TRANSITIONS_JSON)
            .context("Embedded transition seed is invalid")?;
        Ok(Self::new(professions, transitions))
    }

    pub fn new(professions: Vec<Profession>, transitions: Vec<CareerTransitionEdge>) -> Self {
        let by_id = professions
            .iter()
            .enumerate()
            .map(|(index, p)| (p.id.clone(), index))
            .collect();
        Self {
            professions,
            by_id,
            transitions,
        }
    }

    pub fn professions(&self) -> &[Profession] {
        &self.professions
    }

    pub fn get(&self, id: &str) -> Option<&Profession> {
        self.by_id.get(id).map(|&index| &self.professions[index])
    }

    pub fn graph(&self) -> CareerTransitionGraph {
        CareerTransitionGraph {
            nodes: self.professions.clone(),
            edges: self.transitions.clone(),
        }
    }
}
