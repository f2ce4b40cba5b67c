use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation label attached to a cell node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Op {
    /// The cell input.
    #[serde(rename = "input")]
    Input,
    /// The cell output.
    #[serde(rename = "output")]
    Output,
    /// 3x3 convolution followed by batch norm and ReLU.
    #[serde(rename = "conv3x3-bn-relu")]
    Conv3x3BnRelu,
    /// 1x1 convolution followed by batch norm and ReLU.
    #[serde(rename = "conv1x1-bn-relu")]
    Conv1x1BnRelu,
    /// 3x3 max pooling.
    #[serde(rename = "maxpool3x3")]
    MaxPool3x3,
}

/// Operations an intermediate node may carry.
pub const INTERMEDIATE_OPS: [Op; 3] = [Op::Conv3x3BnRelu, Op::Conv1x1BnRelu, Op::MaxPool3x3];

/// Operation of the bridging node inserted before the output in the oracle format.
pub const FIXED_BRIDGE_OP: Op = Op::Conv1x1BnRelu;

impl Op {
    /// Returns the oracle's string label for this operation.
    pub fn label(&self) -> &'static str {
        match self {
            Op::Input => "input",
            Op::Output => "output",
            Op::Conv3x3BnRelu => "conv3x3-bn-relu",
            Op::Conv1x1BnRelu => "conv1x1-bn-relu",
            Op::MaxPool3x3 => "maxpool3x3",
        }
    }

    /// Parses an oracle label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "input" => Some(Op::Input),
            "output" => Some(Op::Output),
            "conv3x3-bn-relu" => Some(Op::Conv3x3BnRelu),
            "conv1x1-bn-relu" => Some(Op::Conv1x1BnRelu),
            "maxpool3x3" => Some(Op::MaxPool3x3),
            _ => None,
        }
    }

    /// Whether the op may sit on an intermediate node.
    pub fn is_intermediate(&self) -> bool {
        INTERMEDIATE_OPS.contains(self)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
