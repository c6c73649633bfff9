use lc3plus::basop::*;
use proptest::prelude::*;

fn clamp16(v: i32) -> i16 {
    v.clamp(i32::from(MIN_16), i32::from(MAX_16)) as i16
}

fn clamp32(v: i64) -> i32 {
    v.clamp(i64::from(MIN_32), i64::from(MAX_32)) as i32
}

// 加减: 结果等于精确和的钳位, 且仅在钳位时置饱和标志
proptest! {
    #[test]
    fn prop_add_sub_clamp(a in any::<i16>(), b in any::<i16>()) {
        let exact = i32::from(a) + i32::from(b);
        diagnostics::reset();
        prop_assert_eq!(add(a, b), clamp16(exact));
        prop_assert_eq!(diagnostics::take_overflow(), exact != i32::from(clamp16(exact)));

        let exact = i32::from(a) - i32::from(b);
        prop_assert_eq!(sub(a, b), clamp16(exact));
        prop_assert_eq!(diagnostics::take_overflow(), exact != i32::from(clamp16(exact)));
    }

    #[test]
    fn prop_l_add_sub_clamp(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(l_add(a, b), clamp32(i64::from(a) + i64::from(b)));
        prop_assert_eq!(l_sub(a, b), clamp32(i64::from(a) - i64::from(b)));
    }

    #[test]
    fn prop_add_commutative(a in any::<i16>(), b in any::<i16>()) {
        prop_assert_eq!(add(a, b), add(b, a));
        prop_assert_eq!(l_mult(a, b), l_mult(b, a));
    }
}

// 绝对值与取反
proptest! {
    #[test]
    fn prop_abs_s(a in any::<i16>()) {
        let expected = if a < 0 { clamp16(-i32::from(a)) } else { a };
        prop_assert_eq!(abs_s(a), expected);
        prop_assert!(abs_s(a) >= 0);
        prop_assert_eq!(negate(a), clamp16(-i32::from(a)));
    }
}

// 移位: 负移位量等价于反方向移位
proptest! {
    #[test]
    fn prop_shift_symmetry(a in any::<i16>(), s in -16i16..=16) {
        prop_assert_eq!(shl(a, -s), shr(a, s));
        prop_assert_eq!(shr(a, -s), shl(a, s));
    }

    #[test]
    fn prop_l_shift_symmetry(a in any::<i32>(), s in -32i16..=32) {
        prop_assert_eq!(l_shl(a, -s), l_shr(a, s));
        prop_assert_eq!(l_shr(a, -s), l_shl(a, s));
    }

    #[test]
    fn prop_shl_saturates(a in any::<i16>(), s in 0i16..=15) {
        let exact = i32::from(a) << s;
        prop_assert_eq!(shl(a, s), clamp16(exact));
    }

    #[test]
    fn prop_shr_is_arithmetic(a in any::<i16>(), s in 0i16..=15) {
        prop_assert_eq!(shr(a, s), a >> s);
    }
}

// 乘法
proptest! {
    #[test]
    fn prop_mult_matches_q15(a in any::<i16>(), b in any::<i16>()) {
        let product = i32::from(a) * i32::from(b);
        prop_assert_eq!(mult(a, b), clamp16(product >> 15));
        prop_assert_eq!(l_mult(a, b), clamp32(i64::from(product) * 2));
        prop_assert_eq!(l_mult0(a, b), product);
    }
}

// 归一化
proptest! {
    #[test]
    fn prop_norm_s_normalizes(v in any::<i16>().prop_filter("非零", |v| *v != 0)) {
        let n = norm_s(v);
        prop_assert!((0..=15).contains(&n));
        let normalized = shl(v, n);
        if v > 0 {
            prop_assert!(normalized >= 0x4000);
        } else {
            prop_assert!(normalized <= -0x4001);
        }
    }

    #[test]
    fn prop_norm_l_normalizes(v in any::<i32>().prop_filter("非零", |v| *v != 0)) {
        let n = norm_l(v);
        prop_assert!((0..=31).contains(&n));
        let normalized = l_shl(v, n);
        if v > 0 {
            prop_assert!(normalized >= 0x4000_0000);
        } else {
            prop_assert!(normalized <= -0x4000_0001);
        }
    }
}

// 除法
proptest! {
    #[test]
    fn prop_div_s_identity(x in 1i16..=MAX_16, y in 1i16..=MAX_16) {
        prop_assert_eq!(div_s(x, x), MAX_16);
        prop_assert_eq!(div_s(0, y), 0);
    }

    #[test]
    fn prop_div_s_is_truncated_quotient(a in 0i16..MAX_16, b in 1i16..=MAX_16) {
        prop_assume!(a < b);
        let expected = (i32::from(a) << 15) / i32::from(b);
        prop_assert_eq!(i32::from(div_s(a, b)), expected);
    }

    #[test]
    fn prop_try_div_s_rejects_domain(a in any::<i16>(), b in any::<i16>()) {
        let valid = a >= 0 && b > 0 && a <= b;
        prop_assert_eq!(try_div_s(a, b).is_ok(), valid);
    }
}

// 半字存取
proptest! {
    #[test]
    fn prop_deposit_extract(v in any::<i16>()) {
        prop_assert_eq!(extract_h(l_deposit_h(v)), v);
        prop_assert_eq!(extract_l(l_deposit_l(v)), v);
        prop_assert_eq!(extract_l(l_deposit_h(v)), 0);
    }
}

// 关闭上报的变体与基础运算数值一致
proptest! {
    #[test]
    fn prop_sat_variants_match(
        a in any::<i16>(),
        b in any::<i16>(),
        l in any::<i32>(),
        s in -40i16..40,
    ) {
        prop_assert_eq!(add_sat(a, b), add(a, b));
        prop_assert_eq!(sub_sat(a, b), sub(a, b));
        prop_assert_eq!(shl_sat(a, s), shl(a, s));
        prop_assert_eq!(l_shl_sat(l, s), l_shl(l, s));
        prop_assert_eq!(l_mac_sat(l, a, b), l_mac(l, a, b));
        prop_assert_eq!(mac_r_sat(l, a, b), mac_r(l, a, b));
    }
}

#[test]
fn test_documented_edge_cases() {
    assert_eq!(mult(MIN_16, MIN_16), MAX_16);
    assert_eq!(l_mult(MIN_16, MIN_16), MAX_32);
    assert_eq!(norm_s(0), 0);
    assert_eq!(norm_s(-1), 15);
    assert_eq!(norm_l(0), 0);
    assert_eq!(norm_l(-1), 31);
    assert_eq!(div_s(3, 5), 19660);
    assert_eq!(abs_s(MIN_16), MAX_16);
}
