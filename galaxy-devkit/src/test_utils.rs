/*!
Test harness: a whole mock galaxy in one call

Spawns one [`MockNode`] per behaviour and hands back their addresses in the
same order, ready to pass to a collector.
*/

use crate::mock_node::{MockNode, NodeBehavior};
use anyhow::Result;

pub struct MockGalaxy {
    nodes: Vec<MockNode>,
}

impl MockGalaxy {
    pub async fn spawn(behaviors: Vec<NodeBehavior>) -> Result<Self> {
        env_logger::try_init().ok();

        let mut nodes = Vec::with_capacity(behaviors.len());
        for behavior in behaviors {
            nodes.push(MockNode::spawn(behavior).await?);
        }
        log::info!("[MOCK] galaxy of {} nodes ready", nodes.len());
        Ok(Self { nodes })
    }

    pub fn addresses(&self) -> Vec<String> {
        self.nodes.iter().map(MockNode::address).collect()
    }

    pub fn node(&self, index: usize) -> Option<&MockNode> {
        self.nodes.get(index)
    }

    /// Total `/system` requests across all nodes
    pub fn total_hits(&self) -> usize {
        self.nodes.iter().map(MockNode::hits).sum()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
