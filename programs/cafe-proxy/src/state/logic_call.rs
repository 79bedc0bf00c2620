use anchor_lang::prelude::*;
use anchor_lang::InstructionData;

/// A business operation routed through the dispatcher
///
/// Each variant carries exactly the arguments of the matching logic
/// instruction. The dispatcher never interprets them; it only re-encodes
/// the call for whichever logic program is active.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum LogicCall {
    Subscribe { payment: u64 },
    ReserveSeat { seat_number: u32 },
    ChangeSeat { new_seat_number: u32 },
    CheckIn { at_location: bool },
    Refund,
}

impl LogicCall {
    /// Instruction data for the logic program
    pub fn data(&self) -> Vec<u8> {
        use cafe_logic::instruction;

        match *self {
            LogicCall::Subscribe { payment } => instruction::Subscribe { payment }.data(),
            LogicCall::ReserveSeat { seat_number } => {
                instruction::ReserveSeat { seat_number }.data()
            }
            LogicCall::ChangeSeat { new_seat_number } => {
                instruction::ChangeSeat { new_seat_number }.data()
            }
            LogicCall::CheckIn { at_location } => instruction::CheckIn { at_location }.data(),
            LogicCall::Refund => instruction::Refund.data(),
        }
    }

    /// Operation tag recorded in `CallForwardedEvent`, equal to the
    /// variant's borsh index
    pub fn tag(&self) -> u8 {
        match self {
            LogicCall::Subscribe { .. } => 0,
            LogicCall::ReserveSeat { .. } => 1,
            LogicCall::ChangeSeat { .. } => 2,
            LogicCall::CheckIn { .. } => 3,
            LogicCall::Refund => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::Discriminator;
    use cafe_logic::instruction;

    #[test]
    fn test_subscribe_encodes_payment() {
        let data = LogicCall::Subscribe { payment: 1_000_000_000 }.data();
        let disc = instruction::Subscribe::DISCRIMINATOR;

        assert!(data.starts_with(disc));
        assert_eq!(&data[disc.len()..], &1_000_000_000u64.to_le_bytes());
    }

    #[test]
    fn test_seat_calls_encode_seat_number() {
        let data = LogicCall::ReserveSeat { seat_number: 7 }.data();
        let disc = instruction::ReserveSeat::DISCRIMINATOR;
        assert!(data.starts_with(disc));
        assert_eq!(&data[disc.len()..], &7u32.to_le_bytes());

        let data = LogicCall::ChangeSeat { new_seat_number: 12 }.data();
        let disc = instruction::ChangeSeat::DISCRIMINATOR;
        assert!(data.starts_with(disc));
        assert_eq!(&data[disc.len()..], &12u32.to_le_bytes());
    }

    #[test]
    fn test_check_in_and_refund() {
        let data = LogicCall::CheckIn { at_location: true }.data();
        let disc = instruction::CheckIn::DISCRIMINATOR;
        assert!(data.starts_with(disc));
        assert_eq!(&data[disc.len()..], &[1u8]);

        let data = LogicCall::Refund.data();
        assert_eq!(data.as_slice(), instruction::Refund::DISCRIMINATOR);
    }

    #[test]
    fn test_calls_map_to_distinct_instructions() {
        let calls = [
            LogicCall::Subscribe { payment: 1 },
            LogicCall::ReserveSeat { seat_number: 1 },
            LogicCall::ChangeSeat { new_seat_number: 1 },
            LogicCall::CheckIn { at_location: true },
            LogicCall::Refund,
        ];
        let prefixes: Vec<Vec<u8>> = calls.iter().map(|c| c.data()[..8].to_vec()).collect();

        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_tag_matches_serialized_variant() {
        let calls = [
            LogicCall::Subscribe { payment: 5 },
            LogicCall::ReserveSeat { seat_number: 2 },
            LogicCall::ChangeSeat { new_seat_number: 3 },
            LogicCall::CheckIn { at_location: false },
            LogicCall::Refund,
        ];

        for call in calls.iter() {
            let mut bytes = Vec::new();
            AnchorSerialize::serialize(call, &mut bytes).unwrap();
            assert_eq!(bytes[0], call.tag());
        }
    }
}
