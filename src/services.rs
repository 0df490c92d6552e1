use once_cell::sync::Lazy;
use std::collections::HashMap;

/// ASM protocol codes attached to a carrier service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsmService {
    pub servicio: &'static str,
    pub horario: &'static str,
}

static SERVICES: Lazy<HashMap<&'static str, AsmService>> = Lazy::new(|| {
    HashMap::from([
        ("ASM10", AsmService { servicio: "1", horario: "0" }),
        ("ASM14", AsmService { servicio: "1", horario: "2" }),
        ("ASM24", AsmService { servicio: "1", horario: "3" }),
        ("ASM72", AsmService { servicio: "1", horario: "18" }),
        ("ASMSAT", AsmService { servicio: "1", horario: "5" }),
        ("ECONOMY", AsmService { servicio: "37", horario: "18" }),
        ("MARITIMO", AsmService { servicio: "6", horario: "10" }),
        ("EUROBUSINESS", AsmService { servicio: "74", horario: "3" }),
        ("EUROESTANDAR", AsmService { servicio: "76", horario: "18" }),
        ("ECOMMERCE", AsmService { servicio: "96", horario: "3" }),
    ])
});

/// Services table keyed by carrier service code.
pub fn services() -> &'static HashMap<&'static str, AsmService> {
    &SERVICES
}

pub fn lookup(code: &str) -> Option<AsmService> {
    SERVICES.get(code).copied()
}
