//! Dependency strategy — manifest changes that imply API or database
//! impact.

use strata_core::types::{Budget, DriftArtifact, Evidence, LayerType, Signal};

use super::{Strategy, StrategyContext};

/// Web/API framework names (any ecosystem).
const API_FRAMEWORKS: &[&str] = &[
    "express", "fastify", "koa", "hapi", "nest", "flask", "django", "fastapi", "rails",
    "sinatra", "spring", "micronaut", "quarkus", "axum", "actix", "rocket", "gin", "echo",
    "laravel", "symfony",
];

/// ORM and database-driver names.
const DB_LIBRARIES: &[&str] = &[
    "prisma", "sequelize", "typeorm", "knex", "mongoose", "sqlalchemy", "alembic", "hibernate",
    "diesel", "sqlx", "activerecord", "doctrine", "gorm", "pg", "mysql", "mysql2", "sqlite3",
    "mongodb", "redis",
];

pub struct DependencyStrategy;

impl Strategy for DependencyStrategy {
    fn name(&self) -> &'static str {
        "dependency"
    }

    fn budget(&self) -> Budget {
        Budget::Medium
    }

    fn run(&self, ctx: &StrategyContext) -> Vec<Signal> {
        let mut signals = Vec::new();

        for config in ctx.artifacts.iter().filter(|a| a.layer_type == LayerType::Configuration) {
            for dep in &config.metadata.dependencies {
                if let Some(hit) = list_hit(dep, API_FRAMEWORKS) {
                    link_layer(
                        ctx,
                        config,
                        LayerType::Api,
                        dep,
                        hit,
                        "dependency_api_framework",
                        &mut signals,
                    );
                }
                if let Some(hit) = list_hit(dep, DB_LIBRARIES) {
                    link_layer(
                        ctx,
                        config,
                        LayerType::Database,
                        dep,
                        hit,
                        "dependency_database_driver",
                        &mut signals,
                    );
                }
            }
        }

        signals
    }
}

/// Match a dependency name against a known-library list. Either side may
/// contain the other (`@nestjs/core` vs `nest`).
fn list_hit<'a>(dep: &str, list: &[&'a str]) -> Option<&'a str> {
    let dep = dep.to_lowercase();
    list.iter().find(|lib| dep == **lib || dep.contains(*lib)).copied()
}

fn link_layer(
    ctx: &StrategyContext,
    config: &DriftArtifact,
    layer: LayerType,
    dep: &str,
    library: &str,
    relationship: &str,
    signals: &mut Vec<Signal>,
) {
    for other in ctx.artifacts.iter().filter(|a| a.layer_type == layer) {
        if !ctx.pair_allowed(&config.artifact_id, &other.artifact_id) {
            continue;
        }
        let mut evidence =
            vec![Evidence::reason(format!("dependency '{dep}' matches known library '{library}'"))];
        if let Some(file) = &config.file {
            evidence.push(Evidence::in_file("declared here", file.clone()));
        }
        signals.push(Signal {
            source: config.artifact_id.clone(),
            target: other.artifact_id.clone(),
            relationship: relationship.to_string(),
            confidence: 0.7,
            evidence,
        });
    }
}
