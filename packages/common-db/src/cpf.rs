//! Validação e normalização de CPF
//!
//! O CPF é armazenado sempre na forma normalizada (apenas os 11 dígitos).
//! A validação segue o algoritmo dos dois dígitos verificadores.

use std::fmt;

use thiserror::Error;

/// Quantidade de dígitos de um CPF
pub const CPF_LEN: usize = 11;

/// Motivos pelos quais um CPF é rejeitado
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfError {
    #[error("CPF deve ter 11 dígitos, recebeu {0}")]
    WrongLength(usize),

    #[error("CPF com todos os dígitos iguais")]
    RepeatedDigits,

    #[error("Dígito verificador do CPF não confere")]
    CheckDigitMismatch,
}

/// Remove tudo que não for dígito
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Indica se a entrada (com ou sem pontuação) é um CPF válido
pub fn is_valid(raw: &str) -> bool {
    Cpf::parse(raw).is_ok()
}

/// Calcula um dígito verificador a partir dos `len` primeiros dígitos,
/// com pesos decrescentes começando em `len + 1`.
fn check_digit(digits: &[u32], len: usize) -> u32 {
    let weight = len as u32 + 1;
    let sum: u32 = digits[..len]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 | 11 => 0,
        rest => rest,
    }
}

/// CPF validado, na forma normalizada
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Normaliza e valida a entrada
    pub fn parse(raw: &str) -> Result<Self, CpfError> {
        let normalized = normalize(raw);
        let digits: Vec<u32> = normalized.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != CPF_LEN {
            return Err(CpfError::WrongLength(digits.len()));
        }
        if digits.iter().all(|d| *d == digits[0]) {
            return Err(CpfError::RepeatedDigits);
        }
        if check_digit(&digits, 9) != digits[9] || check_digit(&digits, 10) != digits[10] {
            return Err(CpfError::CheckDigitMismatch);
        }

        Ok(Self(normalized))
    }

    /// Forma armazenada: apenas dígitos
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Versão para logs, preservando apenas os dígitos verificadores
    pub fn redacted(&self) -> String {
        format!("***.***.***-{}", &self.0[9..])
    }
}

/// Exibe com a máscara `000.000.000-00`
impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        write!(f, "{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}
