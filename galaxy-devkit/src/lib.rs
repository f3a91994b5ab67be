/*!
# Galaxy DevKit - stubs for developing against galaxy nodes

Tooling for testing collectors without real survey nodes:
- Mock nodes serving `GET /system` with scripted behaviour
- Builders for `/system` JSON payloads
- A small harness spawning a whole mock galaxy at once
*/

pub mod mock_node;
pub mod payload;
pub mod test_utils;

pub use mock_node::{MockNode, NodeBehavior};
pub use payload::SystemPayloadBuilder;
pub use test_utils::MockGalaxy;
