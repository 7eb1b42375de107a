use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Vehicle, VehicleFilter};

/// Columns requested by the registry listing.
pub const VEHICLE_LIST_COLUMNS: &str =
    "CODIGO,TIPO,PLACA,RENAVAM,TIPO_CARROCERIA,ESTADO[NOME,SIGLA],TIPO_RODADO,RNTRC,CAPACIDADE_PESO,TARA";
pub const VEHICLE_LIST_ORDERING: &str = "PLACA ASC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    StartsWith,
}

impl FilterOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "IGUAL",
            Self::StartsWith => "COMECA_COM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: &'static str,
    pub operator: FilterOperator,
    pub value: String,
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.operator.as_str(), self.value)
    }
}

/// Comma-joined `FIELD:OPERATOR:VALUE` clauses understood by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    clauses: Vec<FilterClause>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, operator: FilterOperator, value: impl Into<String>) {
        self.clauses.push(FilterClause {
            field,
            operator,
            value: value.into(),
        });
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Registry filter: soft-deleted rows are always excluded first, then the
    /// plate prefix, vehicle kind and state restrictions when present.
    pub fn for_registry(search_text: &str, filter: &VehicleFilter) -> Self {
        let mut expr = Self::new();
        expr.push("EXCLUIDO", FilterOperator::Equal, "N");

        if !search_text.is_empty() {
            expr.push("PLACA", FilterOperator::StartsWith, search_text);
        }

        if let Some(code) = filter.vehicle_kind.and_then(|kind| kind.code()) {
            expr.push("TIPO", FilterOperator::Equal, code);
        }

        if let Some(state) = &filter.state {
            expr.push("ESTADO", FilterOperator::Equal, state.codigo.to_string());
        }

        expr
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, clause) in self.clauses.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Query string of `GET /veiculos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleListQuery {
    pub colunas: String,
    pub ordenacao: String,
    pub filtros: String,
    pub registro_inicial: usize,
    pub numero_registros: usize,
}

impl VehicleListQuery {
    pub fn registry_page(filters: &FilterExpression, offset: usize, page_size: usize) -> Self {
        Self {
            colunas: VEHICLE_LIST_COLUMNS.to_string(),
            ordenacao: VEHICLE_LIST_ORDERING.to_string(),
            filtros: filters.to_string(),
            registro_inicial: offset,
            numero_registros: page_size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VehiclePage {
    #[serde(default)]
    pub registros: Vec<Vehicle>,
    #[serde(default)]
    pub total_registros: usize,
}

/// Partial update body for `PUT /veiculos/{codigo}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VehiclePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluido: Option<bool>,
}

impl VehiclePatch {
    pub fn soft_delete() -> Self {
        Self {
            excluido: Some(true),
        }
    }
}
