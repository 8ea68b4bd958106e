use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use screenmatch::lowlevel::{correlate, Kernel, ScalarKernel, TemplatePlan};
use screenmatch::{Algorithm, ImageView, Method, ScreenMatchError};

fn random_data(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    for value in data.iter_mut() {
        *value = rng.random_range(0..=255);
    }
    data
}

struct Case {
    image: Vec<u8>,
    img_width: usize,
    img_height: usize,
    tpl: Vec<u8>,
    tpl_width: usize,
    tpl_height: usize,
    channels: usize,
    mask: Vec<u8>,
}

impl Case {
    fn new(seed: u64, channels: usize, masked: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (img_width, img_height) = (11, 9);
        let (tpl_width, tpl_height) = (4, 3);
        let image = random_data(&mut rng, img_width * img_height * channels);
        let tpl = random_data(&mut rng, tpl_width * tpl_height * channels);
        let mask = (0..tpl_width * tpl_height)
            .map(|i| if masked && i % 3 == 1 { 0 } else { 255 })
            .collect();
        Self {
            image,
            img_width,
            img_height,
            tpl,
            tpl_width,
            tpl_height,
            channels,
            mask,
        }
    }

    /// Reference score computed directly from the textbook definitions.
    fn bruteforce(&self, algorithm: Algorithm, x: usize, y: usize) -> f64 {
        let c = self.channels;
        let mut pairs = Vec::new();
        let mut active = 0usize;
        for ty in 0..self.tpl_height {
            for tx in 0..self.tpl_width {
                if self.mask[ty * self.tpl_width + tx] == 0 {
                    continue;
                }
                active += 1;
                for ch in 0..c {
                    let t = self.tpl[(ty * self.tpl_width + tx) * c + ch] as f64;
                    let i = self.image[((y + ty) * self.img_width + x + tx) * c + ch] as f64;
                    pairs.push((ch, t, i));
                }
            }
        }
        let n = active as f64;
        let mut t_mean = vec![0.0; c];
        let mut i_mean = vec![0.0; c];
        for &(ch, t, i) in &pairs {
            t_mean[ch] += t / n;
            i_mean[ch] += i / n;
        }

        let sum_tt: f64 = pairs.iter().map(|&(_, t, _)| t * t).sum();
        let sum_ii: f64 = pairs.iter().map(|&(_, _, i)| i * i).sum();
        match algorithm {
            Algorithm::SqDiff => pairs.iter().map(|&(_, t, i)| (t - i) * (t - i)).sum(),
            Algorithm::SqDiffNormed => {
                let sq: f64 = pairs.iter().map(|&(_, t, i)| (t - i) * (t - i)).sum();
                sq / (sum_tt * sum_ii).sqrt()
            }
            Algorithm::CCorr => pairs.iter().map(|&(_, t, i)| t * i).sum(),
            Algorithm::CCorrNormed => {
                let dot: f64 = pairs.iter().map(|&(_, t, i)| t * i).sum();
                dot / (sum_tt * sum_ii).sqrt()
            }
            Algorithm::CCoeff | Algorithm::CCoeffNormed => {
                let mut num = 0.0;
                let mut var_t = 0.0;
                let mut var_i = 0.0;
                for &(ch, t, i) in &pairs {
                    let dt = t - t_mean[ch];
                    let di = i - i_mean[ch];
                    num += dt * di;
                    var_t += dt * dt;
                    var_i += di * di;
                }
                if algorithm == Algorithm::CCoeff {
                    num
                } else {
                    num / (var_t * var_i).sqrt()
                }
            }
        }
    }

    fn check(&self, method: Method) {
        let image =
            ImageView::from_slice(&self.image, self.img_width, self.img_height, self.channels)
                .unwrap();
        let tpl = ImageView::from_slice(&self.tpl, self.tpl_width, self.tpl_height, self.channels)
            .unwrap();
        let plan = TemplatePlan::from_view(tpl, Some(self.mask.clone())).unwrap();
        let surface = correlate(image, &plan, method, false).unwrap().unwrap();
        assert_eq!(surface.width(), self.img_width - self.tpl_width + 1);
        assert_eq!(surface.height(), self.img_height - self.tpl_height + 1);

        for y in 0..surface.height() {
            for x in 0..surface.width() {
                let mut expected = self.bruteforce(method.algorithm, x, y);
                if method.inverted {
                    expected = 1.0 - expected;
                }
                let got = surface.get(x, y).unwrap() as f64;
                let tol = 1e-5 * expected.abs().max(1.0);
                assert!(
                    (got - expected).abs() <= tol,
                    "{:?} at ({x}, {y}): {got} vs {expected}",
                    method
                );
            }
        }
    }
}

#[test]
fn all_algorithms_match_bruteforce_rgb() {
    let case = Case::new(101, 3, false);
    for algorithm in Algorithm::ALL {
        case.check(Method::new(algorithm));
    }
}

#[test]
fn all_algorithms_match_bruteforce_gray_masked() {
    let case = Case::new(202, 1, true);
    for algorithm in Algorithm::ALL {
        case.check(Method::new(algorithm));
    }
}

#[test]
fn masked_rgba_matches_bruteforce() {
    let case = Case::new(303, 4, true);
    for algorithm in Algorithm::ALL {
        case.check(Method::new(algorithm));
    }
}

#[test]
fn inverted_methods_are_one_minus_base() {
    let case = Case::new(404, 3, true);
    for algorithm in Algorithm::ALL {
        case.check(Method::inverted(algorithm));
    }
}

#[test]
fn score_at_agrees_with_full_scan() {
    let case = Case::new(505, 3, false);
    let image = ImageView::from_slice(&case.image, case.img_width, case.img_height, 3).unwrap();
    let tpl = ImageView::from_slice(&case.tpl, case.tpl_width, case.tpl_height, 3).unwrap();
    let plan = TemplatePlan::from_view(tpl, None).unwrap();
    let surface =
        <ScalarKernel as Kernel>::scan_full(image, &plan, Algorithm::CCorrNormed).unwrap();
    for (x, y) in [(0, 0), (3, 2), (7, 6)] {
        let single = <ScalarKernel as Kernel>::score_at(image, &plan, Algorithm::CCorrNormed, x, y);
        assert_eq!(Some(single), surface.get(x, y));
    }
    assert!(
        <ScalarKernel as Kernel>::score_at(image, &plan, Algorithm::CCorrNormed, 8, 0).is_nan()
    );
}

#[test]
fn flat_windows_score_nan_for_normalised_methods() {
    let image = vec![0u8; 8 * 8];
    let tpl: Vec<u8> = (0u8..9).collect();
    let image_view = ImageView::from_slice(&image, 8, 8, 1).unwrap();
    let tpl_view = ImageView::from_slice(&tpl, 3, 3, 1).unwrap();
    let plan = TemplatePlan::from_view(tpl_view, None).unwrap();
    for algorithm in [
        Algorithm::SqDiffNormed,
        Algorithm::CCorrNormed,
        Algorithm::CCoeffNormed,
    ] {
        let surface = correlate(image_view, &plan, Method::new(algorithm), false)
            .unwrap()
            .unwrap();
        assert!(surface.as_slice().iter().all(|s| s.is_nan()), "{algorithm:?}");
    }
    let surface = correlate(image_view, &plan, Method::new(Algorithm::CCorr), false)
        .unwrap()
        .unwrap();
    assert!(surface.as_slice().iter().all(|&s| s == 0.0));
}

#[test]
fn correlate_skips_oversized_and_rejects_channel_mismatch() {
    let image = vec![0u8; 4 * 4 * 3];
    let image_view = ImageView::from_slice(&image, 4, 4, 3).unwrap();

    let wide = vec![1u8; 5 * 2 * 3];
    let wide_view = ImageView::from_slice(&wide, 5, 2, 3).unwrap();
    let plan = TemplatePlan::from_view(wide_view, None).unwrap();
    assert!(correlate(image_view, &plan, Method::default(), false)
        .unwrap()
        .is_none());

    let gray = vec![1u8; 4];
    let gray_view = ImageView::from_slice(&gray, 2, 2, 1).unwrap();
    let plan = TemplatePlan::from_view(gray_view, None).unwrap();
    let err = correlate(image_view, &plan, Method::default(), false)
        .err()
        .unwrap();
    assert_eq!(
        err,
        ScreenMatchError::ChannelMismatch {
            expected: 3,
            got: 1
        }
    );
}
