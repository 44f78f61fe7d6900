//! Recorrido de demostración del motor: registro de pipelines, ejecución
//! con acumulación de efectos, invocación anidada vía contexto y el ciclo
//! completo suspend → serializar → resume.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use rpg_core::{
    DataStore, DecisionOption, DecisionRequest, EngineError, ExecutionContext, PipelineResult,
    Reference, Registry, StageOutput, TypedOutput, TypedStage,
};
use rpg_domain::{HitPointsData, LogData, MemoryDataStore};

// --------------------
// Tipos del recorrido
// --------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct AttackInput {
    attacker: String,
    target: String,
    damage: i32,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct AttackReport {
    target: String,
    damage: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DamageInput {
    target: String,
    amount: i32,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct DamageReport {
    target: String,
    total: i32,
}

// --------------------
// Stages tipados
// --------------------

/// Aplica el daño a la entidad objetivo y emite los efectos correspondientes.
struct CommitDamage;

impl TypedStage for CommitDamage {
    type Input = DamageInput;
    type Output = DamageReport;

    fn name(&self) -> &str {
        "commit-damage"
    }

    fn run_typed(&self,
                 _ctx: &Arc<ExecutionContext>,
                 input: DamageInput)
                 -> Result<TypedOutput<DamageReport>, EngineError> {
        let data: Vec<Box<dyn rpg_core::GameData>> =
            vec![Box::new(HitPointsData::damage(&input.target, input.amount)),
                 Box::new(LogData::new(format!("{} takes {} damage", input.target, input.amount)))];

        Ok(TypedOutput::ContinueWith { value: DamageReport { target: input.target,
                                                             total: input.amount },
                                       data })
    }
}

/// Resuelve el ataque delegando el daño en el pipeline anidado del registry.
struct ResolveAttack;

impl TypedStage for ResolveAttack {
    type Input = AttackInput;
    type Output = AttackReport;

    fn name(&self) -> &str {
        "resolve-attack"
    }

    fn run_typed(&self,
                 ctx: &Arc<ExecutionContext>,
                 input: AttackInput)
                 -> Result<TypedOutput<AttackReport>, EngineError> {
        let damage_ref = damage_reference();
        let damage = ctx.registry.get::<DamageInput, DamageReport>(&damage_ref)?;

        let nested_ctx = ctx.nest(damage_ref.to_string());
        let nested = damage.process(&nested_ctx,
                                    DamageInput { target: input.target.clone(),
                                                  amount: input.damage });

        match nested {
            PipelineResult::Completed { output, data } => {
                Ok(TypedOutput::ContinueWith { value: AttackReport { target: output.target,
                                                                     damage: output.total },
                                               data })
            }
            PipelineResult::Suspended { .. } => Err(EngineError::StageFailed {
                stage: "resolve-attack".to_string(),
                message: "nested damage pipeline suspended unexpectedly".to_string(),
            }),
        }
    }
}

// --------------------
// Referencias y registro
// --------------------

fn attack_reference() -> Reference {
    Reference::new("dnd5e", "pipeline", "attack")
}

fn damage_reference() -> Reference {
    Reference::new("dnd5e", "pipeline", "damage")
}

fn reaction_reference() -> Reference {
    Reference::new("dnd5e", "pipeline", "attack-with-reaction")
}

fn register_pipelines(registry: &Registry) {
    registry.register(&damage_reference(), || {
                rpg_core::Pipeline::<DamageInput, DamageReport>::builder(damage_reference())
                    .stage(CommitDamage)
                    .build()
            });

    registry.register(&attack_reference(), || {
                rpg_core::Pipeline::<AttackInput, AttackReport>::builder(attack_reference())
                    .stage(ResolveAttack)
                    .build()
            });

    // Pipeline con pausa: tira daño, ofrece la reacción y resuelve según la
    // decisión inyectada al reanudar.
    registry.register(&reaction_reference(), || {
        rpg_core::Pipeline::<AttackInput, AttackReport>::builder(reaction_reference())
            .stage_fn("roll-damage", |_ctx, input| {
                let damage = input.get("damage").and_then(|v| v.as_i64()).unwrap_or(0);
                let target = input.get("target").and_then(|v| v.as_str()).unwrap_or("").to_string();
                Ok(StageOutput::Continue(json!({ "target": target, "incoming": damage })))
            })
            .stage_fn("offer-reaction", |_ctx, value| {
                let target = value.get("target").and_then(|v| v.as_str()).unwrap_or("").to_string();
                let incoming = value.get("incoming").cloned().unwrap_or(json!(0));
                let request = DecisionRequest::reaction(&target)
                    .with_option(DecisionOption::new("shield", "Cast Shield", true))
                    .with_option(DecisionOption::new("none", "Take the hit", true))
                    .with_context("incoming_damage", incoming);
                Ok(StageOutput::Suspend { value, request })
            })
            .stage_fn("resolve-damage", |_ctx, value| {
                let target = value.get("target").and_then(|v| v.as_str()).unwrap_or("").to_string();
                let incoming = value.get("incoming").and_then(|v| v.as_i64()).unwrap_or(0) as i32;
                let shielded = value.pointer("/decision/use_shield")
                                    .and_then(|v| v.as_bool())
                                    .unwrap_or(false);
                let final_damage = if shielded { incoming - 5 } else { incoming };

                Ok(StageOutput::ContinueWith {
                    value: json!({ "target": target, "damage": final_damage }),
                    data: vec![Box::new(HitPointsData::damage(&target, final_damage))],
                })
            })
            .build()
    });
}

// --------------------
// Recorridos
// --------------------

/// Ataque directo: resolución anidada vía registry y aplicación de efectos.
fn run_attack_demo(ctx: &Arc<ExecutionContext>) {
    let pipeline = ctx.registry
                      .get::<AttackInput, AttackReport>(&attack_reference())
                      .expect("attack pipeline registrado");

    let result = pipeline.process(ctx,
                                  AttackInput { attacker: "fighter".to_string(),
                                                target: "goblin".to_string(),
                                                damage: 8 });

    let mut store = MemoryDataStore::new();
    store.seed_entity("goblin", 20);

    match result {
        PipelineResult::Completed { output, data } => {
            assert_eq!(output,
                       AttackReport { target: "goblin".to_string(),
                                      damage: 8 });
            for effect in &data {
                store.apply(effect.as_ref()).expect("efecto aplicable");
            }
        }
        PipelineResult::Suspended { .. } => panic!("el ataque directo no debe suspenderse"),
    }

    let goblin = store.entity("goblin").expect("goblin sembrado");
    assert_eq!(goblin.hit_points, 12);
    assert_eq!(store.log(), ["goblin takes 8 damage"]);

    println!("!Demo ataque directo: OK (goblin 20 → {} HP, log registrado)",
             goblin.hit_points);
}

/// Ciclo completo de pausa: suspensión, continuation por JSON y reanudación.
fn run_reaction_demo(ctx: &Arc<ExecutionContext>) {
    let pipeline = ctx.registry
                      .get::<AttackInput, AttackReport>(&reaction_reference())
                      .expect("reaction pipeline registrado");

    let result = pipeline.process(ctx,
                                  AttackInput { attacker: "goblin".to_string(),
                                                target: "wizard".to_string(),
                                                damage: 12 });

    let (continuation, request) = match result {
        PipelineResult::Suspended { continuation, request, .. } => (continuation, request),
        PipelineResult::Completed { .. } => panic!("la reacción debe suspender el pipeline"),
    };

    println!("  decisión pendiente para '{}': {} opciones",
             request.entity_id,
             request.options.len());

    // La continuation viaja como JSON (a un cliente, a disco) y vuelve igual.
    let wire = serde_json::to_string(&continuation).expect("continuation serializable");
    let restored = serde_json::from_str(&wire).expect("continuation restaurable");

    let resumed = pipeline.resume(ctx, restored, json!({ "use_shield": true }))
                          .expect("continuation válida");

    let mut store = MemoryDataStore::new();
    store.seed_entity("wizard", 30);

    match resumed {
        PipelineResult::Completed { output, data } => {
            assert_eq!(output,
                       AttackReport { target: "wizard".to_string(),
                                      damage: 7 });
            for effect in &data {
                store.apply(effect.as_ref()).expect("efecto aplicable");
            }
        }
        PipelineResult::Suspended { .. } => panic!("tras la decisión no quedan pausas"),
    }

    let wizard = store.entity("wizard").expect("wizard sembrado");
    assert_eq!(wizard.hit_points, 23);

    println!("!Demo reacción: OK (Shield redujo 12 → 7, wizard queda en {} HP)",
             wizard.hit_points);
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env()
                                                  .unwrap_or_else(|_| EnvFilter::new("info")))
                             .init();

    let registry = rpg_core::registry::global();
    register_pipelines(&registry);

    let ctx = Arc::new(ExecutionContext::new(Arc::clone(&registry)).with_turn(1, "fighter")
                                                                   .with_call_stack(vec!["combat".to_string()]));

    run_attack_demo(&ctx);
    run_reaction_demo(&ctx);

    println!("!Recorrido completo: OK ({} pipelines registrados)", registry.len());
}
