use crdt_grow_counter::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), CrdtError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "convergence=info,crdt_grow_counter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut node_a = ReplicaCounter::new(ReplicaId::new("A")?);
    let mut node_b = ReplicaCounter::new(ReplicaId::new("B")?);

    // A increments twice, B once, concurrently.
    let op_a1 = node_a.increment();
    let op_a2 = node_a.increment();
    let op_b1 = node_b.increment();
    tracing::info!(state = ?node_a.state(), value = node_a.value(), "node A");
    tracing::info!(state = ?node_b.state(), value = node_b.value(), "node B");

    node_b.apply(&op_a1)?;
    node_b.apply(&op_a2)?;
    node_a.apply(&op_b1)?;

    let merged = merge(node_a.state(), node_b.state());
    let encoded =
        serde_json::to_string(&merged).map_err(|e| CrdtError::Serialization(e.to_string()))?;
    tracing::info!(
        state = %encoded,
        total = merged.total(),
        converged = node_a.value() == node_b.value(),
        "after exchange"
    );
    Ok(())
}
