//! Benchmark for whole-template validation.
//!
//! The engine runs on every keystroke of the editor, so a full pass over a
//! maximum-size template should stay comfortably in the microsecond range.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use templar::{
    validate_template, Agent, AgentType, GraphEdge, GraphStructure, Template, WorkflowConfig,
    WorkflowMode,
};

fn max_size_graph_template() -> Template {
    let agents: Vec<Agent> = (0..5)
        .map(|i| {
            Agent::new(format!("agent-{i}"), AgentType::Research).with_prompts(
                "You are a research agent gathering detailed market data.",
                "Research the given market segment.",
            )
        })
        .collect();
    let ids: Vec<String> = agents.iter().filter_map(|a| a.id.clone()).collect();

    let mut nodes = vec!["start".to_string()];
    nodes.extend(ids.iter().cloned());
    nodes.push("end".to_string());

    let mut edges = vec![GraphEdge::new("start", ids[0].clone())];
    edges.extend(
        ids.windows(2)
            .map(|pair| GraphEdge::new(pair[0].clone(), pair[1].clone())),
    );
    edges.push(GraphEdge::new(ids[4].clone(), "end"));

    let mut template = Template::new("Benchmark template", "A maximum-size graph template");
    template.agents = agents;
    template.workflow = WorkflowConfig {
        mode: WorkflowMode::Graph,
        graph_structure: Some(GraphStructure {
            nodes,
            edges,
            entry_point: Some("start".to_string()),
            exit_points: vec!["end".to_string()],
        }),
        ..WorkflowConfig::default()
    };
    template
}

fn bench_validate_template(c: &mut Criterion) {
    let template = max_size_graph_template();
    c.bench_function("validate_template/5-agent graph", |b| {
        b.iter(|| validate_template(black_box(&template)));
    });
}

criterion_group!(benches, bench_validate_template);
criterion_main!(benches);
