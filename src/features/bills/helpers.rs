use crate::features::bills::dto::{Bill, Chamber, ChamberFilter};
use crate::features::congress::RawBill;

pub(crate) fn sanitise_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub(crate) fn bill_from_raw(raw: RawBill) -> Bill {
    let RawBill {
        title,
        congress,
        number,
        origin_chamber,
        latest_action,
    } = raw;

    let (latest_action_date, latest_action_text) = latest_action
        .map(|action| (action.action_date, action.text))
        .unwrap_or((None, None));

    Bill {
        title,
        session: congress.map(|value| value.to_string()).unwrap_or_default(),
        number: number.to_string(),
        chamber: origin_chamber
            .as_deref()
            .map(Chamber::from_upstream)
            .unwrap_or(Chamber::Unspecified),
        latest_action_date,
        latest_action_text,
    }
}

pub(crate) fn filter_bills(
    bills: Vec<Bill>,
    chamber: Option<ChamberFilter>,
    session: Option<&str>,
) -> Vec<Bill> {
    bills
        .into_iter()
        .filter(|bill| chamber.is_none_or(|filter| filter.matches(bill.chamber)))
        .filter(|bill| session.is_none_or(|wanted| bill.session == wanted))
        .collect()
}
