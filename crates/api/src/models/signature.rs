use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: SmolStr,
    pub type_name: Option<SmolStr>,
    pub has_default: bool,
}

impl ParameterInfo {
    pub fn label(&self) -> String {
        match &self.type_name {
            Some(ty) => format!("{} {}", ty, self.name),
            None => self.name.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignatureInfo {
    pub name: SmolStr,
    pub return_type: Option<SmolStr>,
    pub parameters: Vec<ParameterInfo>,
}

impl SignatureInfo {
    /// Renders `def foo(String a, b)`; untyped returns print as `def`.
    pub fn label(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(ParameterInfo::label).collect();
        let ret = self.return_type.as_deref().unwrap_or("def");
        format!("{} {}({})", ret, self.name, params.join(", "))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignatureHelp {
    /// Every declaration sharing the called name, in declaration order.
    pub signatures: Vec<SignatureInfo>,
    pub active_signature: usize,
    pub active_parameter: usize,
}
