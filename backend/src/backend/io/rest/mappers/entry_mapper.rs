use crate::backend::domain::ledger::TypeFilter;
use crate::backend::domain::models::entry::{
    Entry as DomainEntry, EntryType as DomainEntryType,
};
use shared::{
    Entry as SharedEntry, EntryType as SharedEntryType, EntryTypeFilter,
};

pub struct EntryMapper;

impl EntryMapper {
    pub fn to_dto(domain: DomainEntry) -> SharedEntry {
        SharedEntry {
            id: domain.id,
            date: domain.date,
            description: domain.description,
            amount: domain.amount,
            entry_type: Self::type_to_dto(domain.entry_type),
        }
    }

    pub fn type_to_domain(dto_type: SharedEntryType) -> DomainEntryType {
        match dto_type {
            SharedEntryType::Credit => DomainEntryType::Credit,
            SharedEntryType::Debit => DomainEntryType::Debit,
        }
    }

    pub fn type_to_dto(domain_type: DomainEntryType) -> SharedEntryType {
        match domain_type {
            DomainEntryType::Credit => SharedEntryType::Credit,
            DomainEntryType::Debit => SharedEntryType::Debit,
        }
    }

    /// An absent filter lists everything, like the explicit `all`.
    pub fn filter_to_domain(filter: Option<EntryTypeFilter>) -> TypeFilter {
        match filter {
            None | Some(EntryTypeFilter::All) => TypeFilter::All,
            Some(EntryTypeFilter::Credit) => TypeFilter::Credit,
            Some(EntryTypeFilter::Debit) => TypeFilter::Debit,
        }
    }
}
