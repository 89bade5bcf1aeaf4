//! Contagem de atendimentos por CPF

use std::sync::Arc;

use common_db::cpf::Cpf;
use common_db::models::AttendanceCount;
use common_db::ClinicStore;
use tracing::debug;

use crate::error::ClinicError;

pub struct AttendanceService {
    store: Arc<dyn ClinicStore>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Quantidade de prontuários do paciente dono do CPF; zero se não houver paciente
    pub async fn count(&self, raw_cpf: &str) -> Result<AttendanceCount, ClinicError> {
        let cpf = Cpf::parse(raw_cpf)?;
        let total = self.store.count_attendances_by_cpf(cpf.as_str()).await?;
        debug!(cpf = %cpf.redacted(), total, "Atendimentos contados");

        Ok(AttendanceCount {
            identity_number: cpf.as_str().to_string(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_db::MockClinicStore;

    #[tokio::test]
    async fn test_count_uses_normalized_cpf() {
        let mut mock = MockClinicStore::new();
        mock.expect_count_attendances_by_cpf()
            .withf(|cpf| cpf.to_string() == "11144477735")
            .times(1)
            .returning(|_| Ok(2));

        let count = AttendanceService::new(Arc::new(mock))
            .count("111.444.777-35")
            .await
            .unwrap();
        assert_eq!(
            count,
            AttendanceCount {
                identity_number: "11144477735".to_string(),
                total: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_cpf_is_rejected() {
        let mut mock = MockClinicStore::new();
        mock.expect_count_attendances_by_cpf().never();

        let err = AttendanceService::new(Arc::new(mock))
            .count("000.000.000-00")
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::Validation(_)));
    }
}
