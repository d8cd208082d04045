// Unit tests for NodeRegistry
use async_trait::async_trait;
use mlpipe::error::Result;
use mlpipe::pipeline::{NodeRegistry, PipeMap, PipeNode, Port, register_nodes};

// Test node implementation
struct TestNode {
    name: String,
}

#[async_trait]
impl PipeNode for TestNode {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn inputs(&self) -> Vec<Port> {
        vec![]
    }

    fn outputs(&self) -> Vec<Port> {
        vec![]
    }

    async fn process(&self, data: PipeMap) -> Result<PipeMap> {
        Ok(data)
    }
}

#[test]
fn test_registry_new() {
    let registry = NodeRegistry::new();
    assert!(registry.steps().is_empty());
}

#[test]
fn test_registry_register_and_create() {
    let mut registry = NodeRegistry::new();

    registry.register("test_node", || {
        Box::new(TestNode {
            name: "test".to_string(),
        })
    });

    assert!(registry.contains("test_node"));
    assert_eq!(registry.steps(), vec!["test_node"]);

    let node = registry.create("test_node");
    assert!(node.is_some());
    assert_eq!(node.unwrap().name(), "test");
}

#[test]
fn test_registry_create_nonexistent() {
    let registry = NodeRegistry::new();
    assert!(registry.create("nonexistent").is_none());
}

#[test]
fn test_register_pipeline_steps() {
    let mut registry = NodeRegistry::new();
    register_nodes(&mut registry);

    assert_eq!(registry.steps(), vec!["prep", "train", "evaluate"]);
    for name in registry.steps() {
        assert_eq!(registry.create(&name).unwrap().name(), name);
    }
}

#[test]
fn test_reregistering_keeps_position() {
    let mut registry = NodeRegistry::new();
    for name in ["a", "b", "c"] {
        registry.register(name, move || {
            Box::new(TestNode {
                name: name.to_string(),
            })
        });
    }
    registry.register("a", || {
        Box::new(TestNode {
            name: "replaced".to_string(),
        })
    });

    assert_eq!(registry.steps(), vec!["a", "b", "c"]);
    assert_eq!(registry.create("a").unwrap().name(), "replaced");
}
