extern crate proc_macro;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use std::collections::BTreeSet;
use syn::parse::{Parse, ParseStream, Result};
use syn::punctuated::Punctuated;
use syn::{bracketed, parse_macro_input, Error, Fields, Ident, Item, ItemStruct, LitInt, Token};

/// The contents of an `entities! { ... }` invocation:
/// a list of items, some of which are structs tagged with `#[lanes(...)]`
struct Input {
    items: Vec<Item>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut items = Vec::new();
        while !input.is_empty() {
            items.push(input.parse()?);
        }
        Ok(Input { items })
    }
}

/// One lane of a pack: either `_` (always zero) or a list of names, e.g. `x | e032`
enum LaneSpec {
    Unused,
    Named(Vec<Ident>),
}

impl Parse for LaneSpec {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(Token![_]) {
            input.parse::<Token![_]>()?;
            return Ok(LaneSpec::Unused);
        }
        let names = Punctuated::<Ident, Token![|]>::parse_separated_nonempty(input)?;
        Ok(LaneSpec::Named(names.into_iter().collect()))
    }
}

/// `p1 = [scalar, e23, e31, e12]`
struct PackSpec {
    field: Ident,
    lanes: Vec<LaneSpec>,
}

impl Parse for PackSpec {
    fn parse(input: ParseStream) -> Result<Self> {
        let field: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let content;
        bracketed!(content in input);
        let lanes = Punctuated::<LaneSpec, Token![,]>::parse_terminated(&content)?;
        Ok(PackSpec {
            field,
            lanes: lanes.into_iter().collect(),
        })
    }
}

/// The number of adjacent swaps needed to sort the list.
/// Its parity is the sign of the permutation.
fn bubble_sort_count_swaps(l: &mut [usize]) -> usize {
    let mut swaps: usize = 0;
    for i in (0..l.len()).rev() {
        for j in 0..i {
            if l[j] > l[j + 1] {
                (l[j], l[j + 1]) = (l[j + 1], l[j]);
                swaps += 1
            }
        }
    }
    swaps
}

/// All orderings of `0..n`
fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![vec![]];
    }
    let mut result = vec![];
    for p in permutations(n - 1) {
        for pos in 0..=p.len() {
            let mut q = p.clone();
            q.insert(pos, n - 1);
            result.push(q);
        }
    }
    result
}

/// Parse a basis blade name like `e023` into its basis vector indices.
/// Returns None for names that are not blades (e.g. `x`, `scalar`)
fn blade_indices(name: &str) -> Option<Vec<char>> {
    let digits = name.strip_prefix('e')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let unique: BTreeSet<char> = digits.chars().collect();
    if unique.len() != digits.len() {
        return None;
    }
    Some(digits.chars().collect())
}

/// The grade of a lane, taken from whichever of its names is a blade
fn lane_grade(names: &[Ident]) -> Option<usize> {
    names.iter().find_map(|name| {
        let name = name.to_string();
        if name == "scalar" {
            Some(0)
        } else {
            blade_indices(&name).map(|b| b.len())
        }
    })
}

/// Reversion flips the sign of grades 2 and 3 (and every 4k+2, 4k+3)
fn reverse_sign(grade: usize) -> isize {
    match (grade * grade.saturating_sub(1) / 2) % 2 {
        0 => 1,
        1 => -1,
        _ => panic!("Expected parity to be 0 or 1"),
    }
}

struct Entity {
    name: Ident,
    packs: Vec<PackSpec>,
}

fn parse_entity(item: &mut ItemStruct) -> Result<Option<Entity>> {
    let Some(pos) = item.attrs.iter().position(|a| a.path().is_ident("lanes")) else {
        return Ok(None);
    };
    let attr = item.attrs.remove(pos);
    let packs: Vec<PackSpec> = attr
        .parse_args_with(Punctuated::<PackSpec, Token![,]>::parse_terminated)?
        .into_iter()
        .collect();

    let Fields::Named(fields) = &item.fields else {
        return Err(Error::new_spanned(
            &item.ident,
            "entity structs must have named fields",
        ));
    };
    let field_names: Vec<Ident> = fields
        .named
        .iter()
        .filter_map(|f| f.ident.clone())
        .collect();

    for field in field_names.iter() {
        if !packs.iter().any(|p| &p.field == field) {
            return Err(Error::new_spanned(
                field,
                "every field of an entity must be described in #[lanes(...)]",
            ));
        }
    }

    for pack in packs.iter() {
        if !field_names.contains(&pack.field) {
            return Err(Error::new_spanned(&pack.field, "no such field"));
        }
        if pack.lanes.len() != 4 {
            return Err(Error::new_spanned(
                &pack.field,
                "a pack must describe exactly 4 lanes",
            ));
        }
        for lane in pack.lanes.iter() {
            if let LaneSpec::Named(names) = lane {
                if lane_grade(names).is_none() {
                    return Err(Error::new_spanned(
                        &names[0],
                        "lane needs a blade name, e.g. `x | e032`",
                    ));
                }
            }
        }
    }

    Ok(Some(Entity {
        name: item.ident.clone(),
        packs,
    }))
}

fn gen_accessors(entity: &Entity) -> TokenStream {
    let mut seen = BTreeSet::new();
    let mut accessors = TokenStream::new();

    for pack in entity.packs.iter() {
        let field = &pack.field;
        for (lane_ix, lane) in pack.lanes.iter().enumerate() {
            let LaneSpec::Named(names) = lane else {
                continue;
            };
            let lane_lit = LitInt::new(&format!("{}", lane_ix), Span::call_site());

            for name in names.iter() {
                let name_str = name.to_string();
                let Some(indices) = blade_indices(&name_str) else {
                    // Plain coordinate name, e.g. `x` or `scalar`
                    if seen.insert(name_str.clone()) {
                        let doc = format!("The `{}` coordinate", name_str);
                        accessors.extend(quote! {
                            #[doc = #doc]
                            #[inline]
                            pub fn #name(self) -> f32 {
                                self.#field[#lane_lit]
                            }
                        });
                    }
                    continue;
                };

                // Only spell out permutations of bivectors and trivectors;
                // the pseudoscalar keeps its declared name.
                let orderings = match indices.len() {
                    2 | 3 => permutations(indices.len()),
                    n => vec![(0..n).collect()],
                };

                for ordering in orderings {
                    let spelled: String = ordering.iter().map(|&i| indices[i]).collect();
                    let accessor = format!("e{}", spelled);
                    if !seen.insert(accessor.clone()) {
                        continue;
                    }
                    let mut sorted = ordering.clone();
                    let swaps = bubble_sort_count_swaps(&mut sorted);
                    let accessor_ident = Ident::new(&accessor, Span::call_site());
                    let doc = format!("The coefficient on the basis blade {}", accessor);
                    let body = if swaps % 2 == 0 {
                        quote! { self.#field[#lane_lit] }
                    } else {
                        quote! { -self.#field[#lane_lit] }
                    };
                    accessors.extend(quote! {
                        #[doc = #doc]
                        #[inline]
                        pub fn #accessor_ident(self) -> f32 {
                            #body
                        }
                    });
                }
            }
        }
    }

    let name = &entity.name;
    quote! {
        impl #name {
            #accessors
        }
    }
}

/// Build `Name { p1: [f(p1, 0), f(p1, 1), ...], ... }` from a per-lane expression
fn map_lanes<F: Fn(&Ident, usize, &LaneSpec) -> TokenStream>(
    entity: &Entity,
    f: F,
) -> TokenStream {
    let name = &entity.name;
    let fields: TokenStream = entity
        .packs
        .iter()
        .map(|pack| {
            let field = &pack.field;
            let lanes: Vec<TokenStream> = pack
                .lanes
                .iter()
                .enumerate()
                .map(|(ix, lane)| f(field, ix, lane))
                .collect();
            quote! { #field: [#(#lanes),*], }
        })
        .collect();
    quote! { #name { #fields } }
}

fn gen_reverse(entity: &Entity) -> TokenStream {
    let name = &entity.name;
    let reversed = map_lanes(entity, |field, ix, lane| {
        let ix = LitInt::new(&format!("{}", ix), Span::call_site());
        let sign = match lane {
            LaneSpec::Unused => 1,
            LaneSpec::Named(names) => reverse_sign(lane_grade(names).unwrap_or(0)),
        };
        if sign < 0 {
            quote! { -self.#field[#ix] }
        } else {
            quote! { self.#field[#ix] }
        }
    });
    quote! {
        impl Reverse for #name {
            #[inline]
            fn reverse(self) -> #name {
                #reversed
            }
        }
    }
}

fn gen_linear_ops(entity: &Entity) -> TokenStream {
    let name = &entity.name;
    let lane = |ix: usize| LitInt::new(&format!("{}", ix), Span::call_site());

    let sum = map_lanes(entity, |field, ix, _| {
        let ix = lane(ix);
        quote! { self.#field[#ix] + r.#field[#ix] }
    });
    let difference = map_lanes(entity, |field, ix, _| {
        let ix = lane(ix);
        quote! { self.#field[#ix] - r.#field[#ix] }
    });
    let negation = map_lanes(entity, |field, ix, _| {
        let ix = lane(ix);
        quote! { -self.#field[#ix] }
    });
    let scaled = map_lanes(entity, |field, ix, _| {
        let ix = lane(ix);
        quote! { self.#field[#ix] * r }
    });

    quote! {
        impl core::ops::Add<#name> for #name {
            type Output = #name;
            #[inline]
            fn add(self, r: #name) -> #name {
                #sum
            }
        }

        impl core::ops::Sub<#name> for #name {
            type Output = #name;
            #[inline]
            fn sub(self, r: #name) -> #name {
                #difference
            }
        }

        impl core::ops::Neg for #name {
            type Output = #name;
            #[inline]
            fn neg(self) -> #name {
                #negation
            }
        }

        impl core::ops::Mul<f32> for #name {
            type Output = #name;
            #[inline]
            fn mul(self, r: f32) -> #name {
                #scaled
            }
        }

        impl core::ops::Mul<#name> for f32 {
            type Output = #name;
            #[inline]
            fn mul(self, r: #name) -> #name {
                r * self
            }
        }

        impl core::ops::Div<f32> for #name {
            type Output = #name;
            #[inline]
            fn div(self, r: f32) -> #name {
                self * (1. / r)
            }
        }

        impl core::ops::AddAssign<#name> for #name {
            #[inline]
            fn add_assign(&mut self, r: #name) {
                *self = *self + r;
            }
        }

        impl core::ops::SubAssign<#name> for #name {
            #[inline]
            fn sub_assign(&mut self, r: #name) {
                *self = *self - r;
            }
        }

        impl core::ops::MulAssign<f32> for #name {
            #[inline]
            fn mul_assign(&mut self, r: f32) {
                *self = *self * r;
            }
        }

        impl core::ops::DivAssign<f32> for #name {
            #[inline]
            fn div_assign(&mut self, r: f32) {
                *self = *self / r;
            }
        }
    }
}

fn gen_entities(input: Input) -> Result<TokenStream> {
    let mut emitted = TokenStream::new();
    let mut impls = TokenStream::new();

    for mut item in input.items.into_iter() {
        if let Item::Struct(ref mut item_struct) = item {
            if let Some(entity) = parse_entity(item_struct)? {
                impls.extend(gen_accessors(&entity));
                impls.extend(gen_reverse(&entity));
                impls.extend(gen_linear_ops(&entity));
            }
        }
        emitted.extend(quote! { #item });
    }

    Ok(quote! {
        #emitted
        #impls
    })
}

#[proc_macro]
pub fn entities(input_tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input_tokens as Input);

    match gen_entities(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tokens: TokenStream) -> Result<String> {
        let input: Input = syn::parse2(tokens)?;
        Ok(gen_entities(input)?.to_string())
    }

    #[test]
    fn permutation_signs() {
        assert_eq!(permutations(3).len(), 6);
        let mut odd = vec![1, 0];
        assert_eq!(bubble_sort_count_swaps(&mut odd) % 2, 1);
        let mut even = vec![1, 2, 0];
        assert_eq!(bubble_sort_count_swaps(&mut even) % 2, 0);
    }

    #[test]
    fn blade_names() {
        assert_eq!(blade_indices("e032"), Some(vec!['0', '3', '2']));
        assert_eq!(blade_indices("e00"), None);
        assert_eq!(blade_indices("x"), None);
        assert_eq!(reverse_sign(0), 1);
        assert_eq!(reverse_sign(1), 1);
        assert_eq!(reverse_sign(2), -1);
        assert_eq!(reverse_sign(3), -1);
        assert_eq!(reverse_sign(4), 1);
    }

    #[test]
    fn expands_rotor() {
        let out = expand(quote! {
            #[lanes(p1 = [scalar, e23, e31, e12])]
            #[derive(Clone, Copy)]
            pub struct Rotor {
                p1: [f32; 4],
            }
        })
        .unwrap();
        assert!(out.contains("fn e32"));
        assert!(out.contains("fn e13"));
        assert!(out.contains("impl Reverse for Rotor"));
        assert!(!out.contains("lanes"));
    }

    #[test]
    fn rejects_short_pack() {
        let err = expand(quote! {
            #[lanes(p1 = [scalar, e23])]
            pub struct Broken {
                p1: [f32; 4],
            }
        });
        assert!(err.is_err());
    }

    #[test]
    fn rejects_lane_without_blade() {
        let err = expand(quote! {
            #[lanes(p3 = [w, x, y, z])]
            pub struct Broken {
                p3: [f32; 4],
            }
        });
        assert!(err.is_err());
    }
}
