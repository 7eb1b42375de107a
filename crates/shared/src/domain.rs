use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(VehicleCode);
id_newtype!(StateCode);

/// Kind of registry entry: a self-propelled vehicle or a towed trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleKind {
    Veiculo,
    Reboque,
    #[serde(other)]
    Unknown,
}

impl VehicleKind {
    /// Wire code used in listing filters. `None` for values this client does not know.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Self::Veiculo => Some("VEICULO"),
            Self::Reboque => Some("REBOQUE"),
            Self::Unknown => None,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("veiculo") {
            Some(Self::Veiculo)
        } else if raw.eq_ignore_ascii_case("reboque") {
            Some(Self::Reboque)
        } else {
            None
        }
    }
}

/// Brazilian federative unit, as embedded in vehicle rows (`ESTADO[NOME,SIGLA]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StateRef {
    pub codigo: StateCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigla: Option<String>,
}

impl StateRef {
    pub fn new(codigo: StateCode) -> Self {
        Self {
            codigo,
            nome: None,
            sigla: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Vehicle {
    pub codigo: VehicleCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<VehicleKind>,
    #[serde(default)]
    pub placa: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renavam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_carroceria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<StateRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_rodado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rntrc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacidade_peso: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tara: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluido: Option<bool>,
}

impl Vehicle {
    pub fn new(codigo: VehicleCode, placa: impl Into<String>) -> Self {
        Self {
            codigo,
            tipo: None,
            placa: placa.into(),
            renavam: None,
            tipo_carroceria: None,
            estado: None,
            tipo_rodado: None,
            rntrc: None,
            capacidade_peso: None,
            tara: None,
            excluido: None,
        }
    }
}

/// User-controlled structured filter of the registry screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFilter {
    pub vehicle_kind: Option<VehicleKind>,
    pub state: Option<StateRef>,
}

/// Screen identities known to the navigation and permission layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenToken {
    VeiculosReboques,
    CadastroVeiculo,
}

impl ScreenToken {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeiculosReboques => "veiculos-reboques",
            Self::CadastroVeiculo => "cadastro-veiculo",
        }
    }
}

impl fmt::Display for ScreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Cadastrar,
    Editar,
    Apagar,
}

impl PermissionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cadastrar" | "create" => Some(Self::Cadastrar),
            "editar" | "edit" => Some(Self::Editar),
            "apagar" | "delete" => Some(Self::Apagar),
            _ => None,
        }
    }
}
