use pharmatrack_core::{
    fetch_for_ticket, DataSource, ReportView, ReportViewModel, SessionStatus, FETCH_FAILED_MESSAGE,
};

/// Run one search through the view model and apply the optional filter.
///
/// # Errors
///
/// Returns an error if `drug` is blank, the fetch fails, or the filter is
/// rejected (e.g. a state without a US country).
pub(crate) async fn search_view(
    source: &dyn DataSource,
    drug: &str,
    country: Option<&str>,
    state: Option<&str>,
) -> anyhow::Result<ReportView> {
    let mut vm = ReportViewModel::new();
    let ticket = vm.submit(drug)?;
    let outcome = fetch_for_ticket(source, &ticket).await;
    vm.complete(&ticket, outcome);

    if vm.status() == SessionStatus::Error {
        let message = vm
            .session()
            .error_message
            .clone()
            .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_owned());
        anyhow::bail!(message);
    }

    if let Some(country) = country {
        vm.select_country(country)?;
    }
    if let Some(state) = state {
        vm.select_state(state)?;
    }

    Ok(vm.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pharmatrack_core::{
        DataSourceError, DrugReport, InspectionStatus, ManufacturingSite, SessionError,
    };

    struct FixedSource(Option<DrugReport>);

    #[async_trait]
    impl DataSource for FixedSource {
        async fn fetch_report(&self, _drug_name: &str) -> Result<DrugReport, DataSourceError> {
            self.0
                .clone()
                .ok_or_else(|| DataSourceError::new("connection refused"))
        }
    }

    fn report() -> DrugReport {
        let site = |name: &str, location: &str| ManufacturingSite {
            site_name: name.to_string(),
            location: location.to_string(),
            facility_type: "Packaging".to_string(),
            fei_number: String::new(),
            inspection_status: InspectionStatus::Acceptable,
            last_inspection_date: String::new(),
            interesting_facts: vec![],
            capacity_estimate: String::new(),
        };
        DrugReport {
            name: "Advil".to_string(),
            manufacturer: "Haleon".to_string(),
            approval_date: String::new(),
            drug_class: "NSAID".to_string(),
            sites: vec![
                site("Richmond", "Richmond, VA, USA"),
                site("Lincoln", "Lincoln, NE, USA"),
                site("Dungarvan", "Dungarvan, Waterford, Ireland"),
            ],
            sources: vec![],
        }
    }

    #[tokio::test]
    async fn unfiltered_search_returns_all_sites() {
        let view = search_view(&FixedSource(Some(report())), "Advil", None, None)
            .await
            .unwrap();
        assert_eq!(view.status, SessionStatus::Success);
        assert_eq!(view.filtered_sites.len(), 3);
    }

    #[tokio::test]
    async fn country_and_state_narrow_the_view() {
        let view = search_view(
            &FixedSource(Some(report())),
            "Advil",
            Some("USA"),
            Some("VA"),
        )
        .await
        .unwrap();
        assert_eq!(view.filtered_sites.len(), 1);
        assert_eq!(view.filtered_sites[0].site_name, "Richmond");
        assert_eq!(view.us_states, vec!["NE".to_string(), "VA".to_string()]);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_fixed_message() {
        let err = search_view(&FixedSource(None), "Advil", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn blank_drug_is_rejected() {
        let err = search_view(&FixedSource(Some(report())), "  ", None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::EmptySearchTerm)
        );
    }

    #[tokio::test]
    async fn state_outside_us_is_rejected() {
        let err = search_view(
            &FixedSource(Some(report())),
            "Advil",
            Some("Ireland"),
            Some("Waterford"),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::StateRequiresUsCountry { .. })
        ));
    }
}
