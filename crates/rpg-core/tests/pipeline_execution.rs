//! Ejecución secuencial: threading de valores, acumulación de efectos y los
//! caminos degradados (error de stage, coerción de salida).

use std::sync::Arc;

use serde_json::json;

use rpg_core::{EngineError, ExecutionContext, Pipeline, PipelineResult, Reference, Registry,
               StageOutput};
use rpg_domain::{HitPointsData, LogData};

fn ctx() -> Arc<ExecutionContext> {
    Arc::new(ExecutionContext::new(Arc::new(Registry::new())))
}

fn math_pipeline() -> Pipeline<i64, i64> {
    Pipeline::builder(Reference::new("test", "pipeline", "math"))
        .stage_fn("addFive", |_ctx, v| {
            Ok(StageOutput::Continue(json!(v.as_i64().unwrap_or(0) + 5)))
        })
        .stage_fn("double", |_ctx, v| {
            Ok(StageOutput::Continue(json!(v.as_i64().unwrap_or(0) * 2)))
        })
        .build()
}

#[test]
fn add_five_then_double_completes_with_30() {
    let result = math_pipeline().process(&ctx(), 10);

    match result {
        PipelineResult::Completed { output, data } => {
            assert_eq!(output, 30);
            assert!(data.is_empty(), "arithmetic stages emit no effects");
        }
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[test]
fn effects_are_collected_in_emission_order() {
    let pipeline: Pipeline<i64, i64> =
        Pipeline::builder(Reference::new("test", "pipeline", "damage"))
            .stage_fn("apply-damage", |_ctx, v| {
                Ok(StageOutput::ContinueWith {
                    value: v,
                    data: vec![Box::new(HitPointsData::damage("goblin", 10)),
                               Box::new(LogData::new("Goblin takes damage"))],
                })
            })
            .build();

    let result = pipeline.process(&ctx(), 10);

    let data = result.data();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].entity_id(), "goblin");
    assert_eq!(data[0].payload()["amount"], json!(-10));
    assert_eq!(data[1].entity_id(), "", "log entries are global");
    assert_eq!(data[1].payload()["message"], json!("Goblin takes damage"));
    assert_eq!(result.output(), Some(&10));
}

#[test]
fn failing_second_stage_degrades_to_zero_output_with_partial_effects() {
    // Contrato de `process`: el error del stage se traga y el resultado es
    // Completed con valor cero y solo los efectos del primer stage.
    let pipeline: Pipeline<i64, i64> =
        Pipeline::builder(Reference::new("test", "pipeline", "fragile"))
            .stage_fn("emit", |_ctx, v| {
                Ok(StageOutput::ContinueWith {
                    value: v,
                    data: vec![Box::new(LogData::new("first stage ran"))],
                })
            })
            .stage_fn("boom", |_ctx, _v| {
                Err(EngineError::StageFailed { stage: "boom".to_string(),
                                               message: "intentional".to_string() })
            })
            .stage_fn("never-reached", |_ctx, _v| {
                Ok(StageOutput::ContinueWith {
                    value: json!(999),
                    data: vec![Box::new(LogData::new("should not appear"))],
                })
            })
            .build();

    let result = pipeline.process(&ctx(), 10);

    match result {
        PipelineResult::Completed { output, data } => {
            assert_eq!(output, 0, "zero value of the output type");
            assert_eq!(data.len(), 1);
            assert_eq!(data[0].payload()["message"], json!("first stage ran"));
        }
        other => panic!("expected degraded Completed, got {other:?}"),
    }
}

#[test]
fn unmatching_final_value_degrades_to_zero_output() {
    let pipeline: Pipeline<i64, i64> =
        Pipeline::builder(Reference::new("test", "pipeline", "mistyped"))
            .stage_fn("stringify", |_ctx, _v| {
                Ok(StageOutput::Continue(json!("not a number")))
            })
            .build();

    let result = pipeline.process(&ctx(), 10);
    assert_eq!(result.output(), Some(&0));
}

#[test]
fn identical_invocations_produce_identical_results() {
    let pipeline: Pipeline<i64, i64> =
        Pipeline::builder(Reference::new("test", "pipeline", "stable"))
            .stage_fn("hit", |_ctx, v| {
                Ok(StageOutput::ContinueWith {
                    value: v,
                    data: vec![Box::new(HitPointsData::damage("goblin", 4)),
                               Box::new(LogData::new("hit"))],
                })
            })
            .build();

    let context = ctx();
    let first = pipeline.process(&context, 12);
    let second = pipeline.process(&context, 12);

    assert_eq!(first.output(), second.output());
    let first_data: Vec<_> = first.data().iter().map(|d| (d.kind().to_string(), d.payload())).collect();
    let second_data: Vec<_> = second.data().iter().map(|d| (d.kind().to_string(), d.payload())).collect();
    assert_eq!(first_data, second_data, "pipelines have no invocation-to-invocation memory");
}

#[test]
fn empty_pipeline_passes_input_through() {
    let pipeline: Pipeline<i64, i64> =
        Pipeline::builder(Reference::new("test", "pipeline", "identity")).build();

    assert_eq!(pipeline.process(&ctx(), 42).output(), Some(&42));
}
