use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::new_record_id;
use crate::contract::model::{Examination, ExaminationPatch, ExaminationQuery, NewExamination};
use crate::domain::connectivity::{Connectivity, ReconnectPolicy, RemoteLink};
use crate::domain::error::DomainError;
use crate::domain::ports::{Method, Transport};
use crate::domain::query::filter_examinations;
use crate::domain::store::FallbackStore;
use crate::domain::validation::{validate_examination_patch, validate_new_examination};
use crate::infra::remote::mapper;

const EXAMINATIONS: &str = "pemeriksaan";

fn apply_patch(exam: &mut Examination, patch: ExaminationPatch) {
    if let Some(tanggal) = patch.tanggal {
        exam.tanggal = tanggal;
    }
    if let Some(skor) = patch.skor {
        exam.skor = skor;
    }
    if let Some(usia) = patch.usia {
        exam.usia = usia;
    }
    if let Some(jenis_kelamin) = patch.jenis_kelamin {
        exam.jenis_kelamin = jenis_kelamin;
    }
    if let Some(alamat) = patch.alamat {
        exam.alamat = alamat;
    }
    if let Some(lama_sakit) = patch.lama_sakit {
        exam.lama_sakit = lama_sakit;
    }
    if let Some(pasien) = patch.pasien {
        exam.pasien = Some(pasien);
    }
    exam.updated_at = Utc::now();
}

/// Patient examinations façade
pub struct ExaminationsService {
    link: RemoteLink,
    store: Arc<FallbackStore>,
}

impl ExaminationsService {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<FallbackStore>,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            link: RemoteLink::new(transport, policy, EXAMINATIONS),
            store,
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        self.link.connectivity()
    }

    #[instrument(name = "clinic_admin.service.list_examinations", skip(self, query))]
    pub async fn list_examinations(
        &self,
        query: &ExaminationQuery,
    ) -> Result<Vec<Examination>, DomainError> {
        debug!("Listing examinations");

        let exams = match self
            .link
            .attempt(Method::Get, &[EXAMINATIONS], None, mapper::decode_examinations)
            .await
        {
            Some(exams) => exams,
            None => {
                self.store.simulate_latency().await;
                self.store.examinations().snapshot()
            }
        };

        let exams = filter_examinations(exams, query);
        debug!("Successfully listed {} examinations", exams.len());
        Ok(exams)
    }

    #[instrument(
        name = "clinic_admin.service.create_examination",
        skip(self, new_exam),
        fields(tanggal = %new_exam.tanggal)
    )]
    pub async fn create_examination(
        &self,
        new_exam: NewExamination,
    ) -> Result<Examination, DomainError> {
        info!("Creating examination");
        validate_new_examination(&new_exam)?;

        let body = mapper::examination_body(&new_exam)?;
        if let Some(exam) = self
            .link
            .attempt(
                Method::Post,
                &[EXAMINATIONS],
                Some(body),
                mapper::decode_examination,
            )
            .await
        {
            info!("Successfully created examination with id={}", exam.id);
            return Ok(exam);
        }

        self.store.simulate_latency().await;
        let now = Utc::now();
        let exam = Examination {
            id: new_record_id(),
            tanggal: new_exam.tanggal,
            skor: new_exam.skor,
            usia: new_exam.usia,
            jenis_kelamin: new_exam.jenis_kelamin,
            alamat: new_exam.alamat,
            lama_sakit: new_exam.lama_sakit,
            created_at: now,
            updated_at: now,
            pasien: new_exam.pasien,
        };
        self.store.examinations().append(exam.clone());

        info!("Created examination with id={} in fallback store", exam.id);
        Ok(exam)
    }

    #[instrument(
        name = "clinic_admin.service.update_examination",
        skip(self, patch),
        fields(examination_id = %id)
    )]
    pub async fn update_examination(
        &self,
        id: &str,
        patch: ExaminationPatch,
    ) -> Result<Examination, DomainError> {
        info!("Updating examination");
        validate_examination_patch(&patch)?;

        let body = mapper::examination_patch_body(&patch)?;
        if let Some(exam) = self
            .link
            .attempt(
                Method::Put,
                &[EXAMINATIONS, id],
                Some(body),
                mapper::decode_examination,
            )
            .await
        {
            info!("Successfully updated examination");
            return Ok(exam);
        }

        self.store.simulate_latency().await;
        let exam = self
            .store
            .examinations()
            .update_by_id(id, |e| apply_patch(e, patch))
            .ok_or_else(|| DomainError::examination_not_found(id))?;

        info!("Updated examination in fallback store");
        Ok(exam)
    }

    #[instrument(
        name = "clinic_admin.service.delete_examination",
        skip(self),
        fields(examination_id = %id)
    )]
    pub async fn delete_examination(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting examination");

        if self
            .link
            .attempt(Method::Delete, &[EXAMINATIONS, id], None, |_| Ok(()))
            .await
            .is_some()
        {
            info!("Successfully deleted examination");
            return Ok(());
        }

        self.store.simulate_latency().await;
        self.store
            .examinations()
            .remove_by_id(id)
            .ok_or_else(|| DomainError::examination_not_found(id))?;

        info!("Deleted examination from fallback store");
        Ok(())
    }
}
